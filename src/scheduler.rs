use std::rc::Rc;

use gloo::timers::callback::Interval;

use crate::runtime::{TickHandle, TickScheduler};

pub(crate) struct IntervalScheduler;

struct IntervalTicket {
    _interval: Interval,
}

impl TickHandle for IntervalTicket {}

impl TickScheduler for IntervalScheduler {
    fn start(&self, interval_ms: u32, on_tick: Rc<dyn Fn()>) -> Box<dyn TickHandle> {
        let interval = Interval::new(interval_ms, move || on_tick());
        Box::new(IntervalTicket {
            _interval: interval,
        })
    }
}
