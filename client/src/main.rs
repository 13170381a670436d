mod app;
mod chart_view;
mod dropdown;
mod fetch;
mod layout;
mod map_view;
mod tooltip;

use std::any::Any;
use std::cell::RefCell;

use leptos::mount::mount_to;

thread_local! {
    static APP_MOUNT_HANDLE: RefCell<Option<Box<dyn Any>>> = const { RefCell::new(None) };
}

fn main() {
    console_error_panic_hook::set_once();

    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };
    let Some(body) = document.body() else {
        return;
    };

    let handle = mount_to(body, app::App);
    APP_MOUNT_HANDLE.with(|slot| {
        *slot.borrow_mut() = Some(Box::new(handle));
    });
}
