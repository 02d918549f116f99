use std::rc::Rc;

use queens_quadrille_core::{BoardState, Command, GatewayError, Snapshot, SolveReply, SolveRequest};

#[derive(Clone)]
pub(crate) struct ViewHooks {
    pub(crate) on_command: Rc<dyn Fn(Command)>,
}

// The display layer. It renders snapshots and shows transient notices; it
// never reaches back into session state except through commands.
pub(crate) trait BoardView {
    fn init(&mut self, hooks: ViewHooks);
    fn render(&mut self, snapshot: &Snapshot);
    fn notice(&mut self, message: &str);
}

// Request/response seam to the external solver process. Completion callbacks
// re-enter the dispatch loop; there is no cancellation for in-flight calls.
pub(crate) trait SolverGateway {
    fn generate(&self, done: Rc<dyn Fn(Result<BoardState, GatewayError>)>);
    fn solve(&self, request: SolveRequest, done: Rc<dyn Fn(Result<SolveReply, GatewayError>)>);
}

// Recurring-timer seam for autoplay. Dropping the handle cancels the
// schedule, so exactly one ticker can be live at a time.
pub(crate) trait TickScheduler {
    fn start(&self, interval_ms: u32, on_tick: Rc<dyn Fn()>) -> Box<dyn TickHandle>;
}

pub(crate) trait TickHandle {}
