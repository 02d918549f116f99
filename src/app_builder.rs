use std::cell::RefCell;
use std::rc::Rc;

use gloo::console;
use web_sys::{window, Document};

use queens_quadrille_core::Command;

use crate::app_core::AppCore;
use crate::dom_view::DomView;
use crate::runtime::{BoardView, ViewHooks};
use crate::scheduler::IntervalScheduler;
use crate::solver_gateway::FetchGateway;

// Kept alive for the lifetime of the page; dropping the view would detach
// every listener.
#[allow(dead_code)]
struct App {
    core: Rc<AppCore>,
    view: Rc<RefCell<DomView>>,
}

thread_local! {
    static APP: RefCell<Option<App>> = RefCell::new(None);
}

fn api_base(document: &Document) -> String {
    document
        .body()
        .and_then(|body| body.get_attribute("data-api-base"))
        .unwrap_or_default()
}

pub(crate) fn run() {
    let Some(window) = window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };

    let core = AppCore::new(
        Box::new(FetchGateway::new(api_base(&document))),
        Box::new(IntervalScheduler),
    );
    let Some(view) = DomView::mount(document) else {
        console::warn!("board mount failed");
        return;
    };
    let view = Rc::new(RefCell::new(view));

    let dispatch_core = core.clone();
    view.borrow_mut().init(ViewHooks {
        on_command: Rc::new(move |command| dispatch_core.dispatch(command)),
    });

    let render_view = view.clone();
    core.subscribe_render(Rc::new(move |snapshot| {
        render_view.borrow_mut().render(snapshot);
    }));
    let notice_view = view.clone();
    core.subscribe_notice(Rc::new(move |message| {
        notice_view.borrow_mut().notice(message);
    }));

    let snapshot = core.snapshot();
    view.borrow_mut().render(&snapshot);

    // The page opens on a freshly generated, solved board.
    core.dispatch(Command::RequestGenerate);

    APP.with(|slot| {
        *slot.borrow_mut() = Some(App { core, view });
    });
}
