mod behaviors;
mod bootstrap;
mod dom;
mod error;
mod listener;
mod page;

fn main() {
    console_error_panic_hook::set_once();
    if let Err(err) = page::boot() {
        gloo_console::error!(format!("could not boot page behaviors: {err}"));
    }
}
