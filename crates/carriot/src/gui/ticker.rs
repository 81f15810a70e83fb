use crate::gui::menu::RadialMenu;
use gtk::prelude::*;
use gtk4 as gtk;
use std::cell::RefCell;
use std::rc::Rc;

/// Drives [`RadialMenu::tick`] from the widget's frame clock, once per displayed frame.
///
/// The tick callback id is the cancellation handle: [`FrameTicker::stop`] (or dropping
/// the ticker) removes the callback so nothing keeps firing after the view goes away.
#[derive(Default)]
pub struct FrameTicker {
    id: Option<gtk::TickCallbackId>,
}

impl FrameTicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.id.is_some()
    }

    pub fn start(&mut self, widget: &impl IsA<gtk::Widget>, menu: Rc<RefCell<RadialMenu>>) {
        if self.is_running() {
            return;
        }

        let id = widget.add_tick_callback(move |widget, _clock| {
            if menu.borrow_mut().tick() {
                widget.queue_draw();
            }
            glib::ControlFlow::Continue
        });
        self.id = Some(id);
        log::debug!("Frame ticker started");
    }

    pub fn stop(&mut self) {
        if let Some(id) = self.id.take() {
            id.remove();
            log::debug!("Frame ticker stopped");
        }
    }
}

impl Drop for FrameTicker {
    fn drop(&mut self) {
        self.stop();
    }
}
