mod app_builder;
mod app_core;
mod dom_view;
mod runtime;
mod scheduler;
mod solver_gateway;

fn main() {
    app_builder::run();
}
