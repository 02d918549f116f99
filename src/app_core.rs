use std::cell::RefCell;
use std::rc::Rc;

use queens_quadrille_core::{Command, Effect, Session, Snapshot, SolveRequest};

use crate::runtime::{SolverGateway, TickHandle, TickScheduler};

pub(crate) type RenderHook = Rc<dyn Fn(&Snapshot)>;
pub(crate) type NoticeHook = Rc<dyn Fn(&str)>;

// Owns the session record; every user gesture, timer tick, and gateway
// completion funnels through dispatch, which runs the reducer and then
// interprets its effects.
pub(crate) struct AppCore {
    session: RefCell<Session>,
    gateway: Box<dyn SolverGateway>,
    scheduler: Box<dyn TickScheduler>,
    ticker: RefCell<Option<Box<dyn TickHandle>>>,
    render_hooks: RefCell<Vec<RenderHook>>,
    notice_hooks: RefCell<Vec<NoticeHook>>,
}

impl AppCore {
    pub(crate) fn new(
        gateway: Box<dyn SolverGateway>,
        scheduler: Box<dyn TickScheduler>,
    ) -> Rc<Self> {
        Rc::new(Self {
            session: RefCell::new(Session::new()),
            gateway,
            scheduler,
            ticker: RefCell::new(None),
            render_hooks: RefCell::new(Vec::new()),
            notice_hooks: RefCell::new(Vec::new()),
        })
    }

    pub(crate) fn subscribe_render(&self, hook: RenderHook) {
        self.render_hooks.borrow_mut().push(hook);
    }

    pub(crate) fn subscribe_notice(&self, hook: NoticeHook) {
        self.notice_hooks.borrow_mut().push(hook);
    }

    pub(crate) fn snapshot(&self) -> Snapshot {
        self.session.borrow().snapshot()
    }

    pub(crate) fn dispatch(self: &Rc<Self>, command: Command) {
        // The session borrow ends before effects run, so a gateway stub that
        // completes synchronously can re-enter dispatch safely.
        let effects = self.session.borrow_mut().apply(command);
        for effect in effects {
            self.run_effect(effect);
        }
    }

    fn run_effect(self: &Rc<Self>, effect: Effect) {
        match effect {
            Effect::Render => {
                let snapshot = self.snapshot();
                for hook in self.render_hooks.borrow().iter() {
                    hook(&snapshot);
                }
            }
            Effect::StartTicker { interval_ms } => {
                let weak = Rc::downgrade(self);
                let handle = self.scheduler.start(
                    interval_ms,
                    Rc::new(move || {
                        if let Some(core) = weak.upgrade() {
                            core.dispatch(Command::Tick);
                        }
                    }),
                );
                *self.ticker.borrow_mut() = Some(handle);
            }
            Effect::StopTicker => {
                self.ticker.borrow_mut().take();
            }
            Effect::Generate => {
                let weak = Rc::downgrade(self);
                self.gateway.generate(Rc::new(move |result| {
                    if let Some(core) = weak.upgrade() {
                        core.dispatch(Command::GenerateFinished(result));
                    }
                }));
            }
            Effect::Solve {
                board,
                targets,
                origin,
            } => {
                let weak = Rc::downgrade(self);
                let submitted = board;
                self.gateway.solve(
                    SolveRequest { board, targets },
                    Rc::new(move |result| {
                        if let Some(core) = weak.upgrade() {
                            core.dispatch(Command::SolveFinished {
                                origin,
                                submitted,
                                result,
                            });
                        }
                    }),
                );
            }
            Effect::Notice { message } => {
                for hook in self.notice_hooks.borrow().iter() {
                    hook(&message);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use queens_quadrille_core::{
        BoardState, Command, GatewayError, SolveReply, SolveRequest, TargetMode,
    };

    use super::AppCore;
    use crate::runtime::{SolverGateway, TickHandle, TickScheduler};

    struct StubGateway {
        board: BoardState,
        moves: RefCell<Option<Vec<BoardState>>>,
        solve_requests: Rc<RefCell<Vec<SolveRequest>>>,
    }

    impl SolverGateway for StubGateway {
        fn generate(&self, done: Rc<dyn Fn(Result<BoardState, GatewayError>)>) {
            done(Ok(self.board));
        }

        fn solve(
            &self,
            request: SolveRequest,
            done: Rc<dyn Fn(Result<SolveReply, GatewayError>)>,
        ) {
            self.solve_requests.borrow_mut().push(request);
            let moves = self.moves.borrow_mut().take();
            match moves {
                Some(moves) => done(Ok(SolveReply {
                    moves,
                    time_ms: 7.0,
                    already_at_target: false,
                })),
                None => done(Err(GatewayError::Transport("stub exhausted".to_string()))),
            }
        }
    }

    #[derive(Clone, Default)]
    struct ManualScheduler {
        ticks: Rc<RefCell<Vec<Rc<dyn Fn()>>>>,
        live: Rc<RefCell<usize>>,
    }

    struct ManualHandle {
        live: Rc<RefCell<usize>>,
    }

    impl TickHandle for ManualHandle {}

    impl Drop for ManualHandle {
        fn drop(&mut self) {
            *self.live.borrow_mut() -= 1;
        }
    }

    impl TickScheduler for ManualScheduler {
        fn start(&self, _interval_ms: u32, on_tick: Rc<dyn Fn()>) -> Box<dyn TickHandle> {
            self.ticks.borrow_mut().push(on_tick);
            *self.live.borrow_mut() += 1;
            Box::new(ManualHandle {
                live: self.live.clone(),
            })
        }
    }

    fn path(boards: &[&str]) -> Vec<BoardState> {
        boards.iter().map(|text| BoardState::parse(text)).collect()
    }

    #[test]
    fn generate_chains_into_solve_and_loads_the_solution() {
        let solve_requests = Rc::new(RefCell::new(Vec::new()));
        let board = BoardState::parse("QKRB            ");
        let gateway = StubGateway {
            board,
            moves: RefCell::new(Some(path(&["QKRB            ", " QKRB           "]))),
            solve_requests: solve_requests.clone(),
        };
        let core = AppCore::new(Box::new(gateway), Box::new(ManualScheduler::default()));

        core.dispatch(Command::RequestGenerate);

        let requests = solve_requests.borrow();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].board, board);
        assert_eq!(requests[0].targets, vec![0, 15]);

        let snapshot = core.snapshot();
        assert_eq!(snapshot.move_count, 1);
        assert_eq!(snapshot.step, 0);
        assert!(!snapshot.busy);
        assert_eq!(snapshot.target_mode, TargetMode::Corners);
    }

    #[test]
    fn ticker_lifecycle_follows_the_reducer() {
        let scheduler = ManualScheduler::default();
        let gateway = StubGateway {
            board: BoardState::empty(),
            moves: RefCell::new(Some(path(&[
                "Q               ",
                " Q              ",
                "  Q             ",
            ]))),
            solve_requests: Rc::new(RefCell::new(Vec::new())),
        };
        let core = AppCore::new(Box::new(gateway), Box::new(scheduler.clone()));
        core.dispatch(Command::RequestSolve);

        core.dispatch(Command::TogglePlay);
        assert_eq!(*scheduler.live.borrow(), 1);

        let tick = scheduler.ticks.borrow().last().cloned().unwrap();
        tick();
        assert_eq!(core.snapshot().step, 1);
        tick();
        assert_eq!(core.snapshot().step, 2);
        assert_eq!(*scheduler.live.borrow(), 1);

        // A tick at the last step cancels the schedule instead of advancing.
        tick();
        assert_eq!(core.snapshot().step, 2);
        assert_eq!(*scheduler.live.borrow(), 0);
        assert!(!core.snapshot().playing);
    }

    #[test]
    fn notices_reach_subscribers() {
        let gateway = StubGateway {
            board: BoardState::empty(),
            moves: RefCell::new(None),
            solve_requests: Rc::new(RefCell::new(Vec::new())),
        };
        let core = AppCore::new(Box::new(gateway), Box::new(ManualScheduler::default()));
        let notices = Rc::new(RefCell::new(Vec::new()));
        let sink = notices.clone();
        core.subscribe_notice(Rc::new(move |message: &str| {
            sink.borrow_mut().push(message.to_string());
        }));

        core.dispatch(Command::RequestSolve);
        assert_eq!(notices.borrow().len(), 1);
        assert!(notices.borrow()[0].starts_with("Failed to solve"));
        assert!(!core.snapshot().busy);
    }
}
