use crate::config::{self, Config};
use crate::events::AppEvent;
use crate::gui::menu::{self, CANVAS_SIZE, Point, RadialMenu, Zone};
use crate::gui::theme::{self, ThemeColors};
use crate::gui::ticker::FrameTicker;
use crate::gui::window;
use crate::history::MovementHistory;
use crate::monitor::{MonitorBoard, MonitorSnapshot};
use crate::sys::dispatch::Job;
use carriot_link::{CommandId, MovementRecord, MovementRequest, Speed};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::RelmWidgetExt;
use relm4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

pub struct AppModel {
    pub menu: Rc<RefCell<RadialMenu>>,
    pub config: Config,
    pub speed: Speed,
    pub history: MovementHistory,
    pub status: String,
    pub visible: bool,
    pub monitor: MonitorBoard,
    pub jobs: async_channel::Sender<Job>,
    pub drawing_area: gtk::DrawingArea,
    pub ticker: FrameTicker,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spin {
    Left,
    Right,
}

#[derive(Debug)]
pub enum AppMsg {
    Show,
    Hide,
    Stop,
    PointerMove(Point),
    PointerLeave,
    Click(Point),
    Spin(Spin),
    SetSpeed(Speed),
    CommandSent(MovementRecord),
    CommandFailed { action: CommandId, reason: String },
    RefreshMonitor,
    MonitorLoaded(MonitorSnapshot),
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::Show => AppMsg::Show,
            AppEvent::Hide => AppMsg::Hide,
            AppEvent::Stop => AppMsg::Stop,
            AppEvent::CommandSent(record) => AppMsg::CommandSent(record),
            AppEvent::CommandFailed { action, reason } => AppMsg::CommandFailed { action, reason },
            AppEvent::MonitorLoaded(snapshot) => AppMsg::MonitorLoaded(snapshot),
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (
        RadialMenu,
        Config,
        async_channel::Sender<Job>,
        async_channel::Receiver<AppEvent>,
    );
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Carriot"),
            set_resizable: false,
            #[watch]
            set_visible: model.visible,
            add_css_class: "carriot-window",

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    match key {
                        gtk::gdk::Key::Escape => {
                            sender.input(AppMsg::Hide);
                            glib::Propagation::Stop
                        }
                        gtk::gdk::Key::space => {
                            sender.input(AppMsg::Stop);
                            glib::Propagation::Stop
                        }
                        _ => glib::Propagation::Proceed,
                    }
                }
            },

            gtk::Box {
                set_orientation: gtk::Orientation::Horizontal,
                set_spacing: 16,
                set_margin_all: 12,

                gtk::Box {
                    set_orientation: gtk::Orientation::Vertical,
                    set_spacing: 8,

                    #[name = "drawing_area"]
                    gtk::DrawingArea {
                        set_content_width: CANVAS_SIZE,
                        set_content_height: CANVAS_SIZE,
                        set_halign: gtk::Align::Center,
                        add_css_class: "carriot-wheel",

                        add_controller = gtk::EventControllerMotion {
                            connect_motion[sender] => move |_, x, y| {
                                sender.input(AppMsg::PointerMove(Point::new(x, y)));
                            },
                            connect_leave[sender] => move |_| {
                                sender.input(AppMsg::PointerLeave);
                            },
                        },

                        add_controller = gtk::GestureClick {
                            set_button: gtk::gdk::BUTTON_PRIMARY,
                            connect_released[sender] => move |_, _, x, y| {
                                sender.input(AppMsg::Click(Point::new(x, y)));
                            }
                        }
                    },

                    gtk::Box {
                        set_orientation: gtk::Orientation::Horizontal,
                        set_spacing: 8,
                        set_halign: gtk::Align::Center,

                        gtk::Button {
                            set_label: "⟲ 360°",
                            set_tooltip_text: Some("Spin left"),
                            connect_clicked => AppMsg::Spin(Spin::Left),
                        },

                        #[name = "speed_selector"]
                        gtk::DropDown::from_strings(&Speed::labels()) {
                            set_selected: model.speed.as_index() as u32,
                            connect_selected_notify[sender] => move |dropdown| {
                                if let Some(speed) = Speed::from_index(dropdown.selected() as usize) {
                                    sender.input(AppMsg::SetSpeed(speed));
                                }
                            },
                        },

                        gtk::Button {
                            set_label: "360° ⟳",
                            set_tooltip_text: Some("Spin right"),
                            connect_clicked => AppMsg::Spin(Spin::Right),
                        },
                    },

                    gtk::Label {
                        set_xalign: 0.0,
                        add_css_class: "carriot-status",
                        #[watch]
                        set_label: &model.status,
                    },

                    gtk::Label {
                        set_xalign: 0.0,
                        add_css_class: "carriot-history",
                        #[watch]
                        set_label: &model.history.to_string(),
                    },
                },

                gtk::Box {
                    set_orientation: gtk::Orientation::Vertical,
                    set_spacing: 6,
                    set_width_request: 300,
                    add_css_class: "carriot-monitor",

                    gtk::Box {
                        set_orientation: gtk::Orientation::Horizontal,
                        set_spacing: 8,

                        gtk::Label {
                            set_hexpand: true,
                            set_xalign: 0.0,
                            add_css_class: "carriot-heading",
                            #[watch]
                            set_label: &format!("Vehicle {}", model.monitor.device_id()),
                        },

                        gtk::Button {
                            set_icon_name: "view-refresh-symbolic",
                            set_tooltip_text: Some("Reload recorded activity"),
                            connect_clicked => AppMsg::RefreshMonitor,
                        },
                    },

                    gtk::Label {
                        set_xalign: 0.0,
                        add_css_class: "carriot-card",
                        #[watch]
                        set_label: &model.monitor.movement_card(),
                    },

                    gtk::Label {
                        set_xalign: 0.0,
                        add_css_class: "carriot-card",
                        #[watch]
                        set_label: &model.monitor.obstacle_card(),
                    },

                    gtk::Label {
                        set_xalign: 0.0,
                        set_label: "Movements",
                        add_css_class: "carriot-heading",
                    },
                    gtk::Label {
                        set_xalign: 0.0,
                        add_css_class: "carriot-history",
                        #[watch]
                        set_label: &model.monitor.movements.to_string(),
                    },

                    gtk::Label {
                        set_xalign: 0.0,
                        set_label: "Obstacles",
                        add_css_class: "carriot-heading",
                    },
                    gtk::Label {
                        set_xalign: 0.0,
                        add_css_class: "carriot-history",
                        #[watch]
                        set_label: &model.monitor.obstacles.to_string(),
                    },

                    gtk::Label {
                        set_xalign: 0.0,
                        set_label: "Demos",
                        add_css_class: "carriot-heading",
                    },
                    gtk::Label {
                        set_xalign: 0.0,
                        add_css_class: "carriot-history",
                        #[watch]
                        set_label: &model.monitor.demos.to_string(),
                    },
                },
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (menu, config, jobs, rx) = init;

        theme::load_css();

        let model = AppModel {
            menu: Rc::new(RefCell::new(menu)),
            speed: config.api.default_speed,
            history: MovementHistory::new(config.history.capacity),
            monitor: MonitorBoard::new(&config.monitor),
            status: format!("Ready, sending to {}", config.api.base_url),
            visible: true,
            config,
            jobs,
            drawing_area: gtk::DrawingArea::default(),
            ticker: FrameTicker::new(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        let menu_draw = model.menu.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, width, height| {
                let style_context = drawing_area.style_context();
                let colors = ThemeColors::from_context(&style_context);
                let canvas = menu::Size::new(width as f64, height as f64);
                if let Err(e) = menu::draw(cr, &menu_draw.borrow(), canvas, &colors) {
                    log::error!("Drawing error: {}", e);
                }
            });

        model.ticker.start(&model.drawing_area, model.menu.clone());

        sender.input(AppMsg::RefreshMonitor);

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Show => {
                self.visible = true;
                self.ticker.start(&self.drawing_area, self.menu.clone());
                if let Some(point) = window::get_cursor_position(&self.drawing_area) {
                    self.pointer_moved(point);
                }
            }
            AppMsg::Hide => {
                self.visible = false;
                self.ticker.stop();
                self.menu.borrow_mut().pointer_left();
            }
            AppMsg::PointerMove(point) => self.pointer_moved(point),
            AppMsg::PointerLeave => {
                self.menu.borrow_mut().pointer_left();
                window::update_cursor(&self.drawing_area, Zone::Outside);
            }
            AppMsg::Click(point) => {
                let canvas = window::canvas_size(&self.drawing_area);
                let command = {
                    let menu = self.menu.borrow();
                    match menu.locate(point, canvas) {
                        Zone::Center => Some(self.config.wheel.center_command.clone()),
                        Zone::Segment(_) => menu.activate(point, canvas).cloned(),
                        Zone::Outside => None,
                    }
                };
                if let Some(command) = command {
                    self.submit(command);
                }
            }
            AppMsg::Stop => self.submit(self.config.wheel.center_command.clone()),
            AppMsg::Spin(Spin::Left) => self.submit(self.config.spin.left.clone()),
            AppMsg::Spin(Spin::Right) => self.submit(self.config.spin.right.clone()),
            AppMsg::SetSpeed(speed) => {
                log::info!("Speed set to {}", speed);
                self.speed = speed;
            }
            AppMsg::CommandSent(record) => {
                self.status = format!("Sent {} at {}", record.action.words(), record.speed.label());
                self.history.push(record);
                self.refresh_monitor();
            }
            AppMsg::CommandFailed { action, reason } => {
                self.status = format!("Failed to send {}: {}", action.words(), reason);
            }
            AppMsg::RefreshMonitor => self.refresh_monitor(),
            AppMsg::MonitorLoaded(snapshot) => self.monitor.apply(snapshot),
            AppMsg::ConfigReload => self.reload_config(),
        }
    }
}

impl AppModel {
    fn pointer_moved(&mut self, point: Point) {
        let canvas = window::canvas_size(&self.drawing_area);
        let zone = {
            let mut menu = self.menu.borrow_mut();
            menu.pointer_moved(point, canvas);
            menu.locate(point, canvas)
        };
        window::update_cursor(&self.drawing_area, zone);
    }

    fn enqueue(&mut self, job: Job) {
        if let Err(e) = self.jobs.try_send(job) {
            log::error!("Job queue unavailable: {}", e);
            self.status = "Command queue unavailable".to_string();
        }
    }

    fn submit(&mut self, action: CommandId) {
        let request = MovementRequest::new(action, self.speed);
        log::info!("Queueing '{}' at {}", request.action, request.speed);
        self.status = format!("Sending {}...", request.action.words());
        self.enqueue(Job::Submit(request));
    }

    fn refresh_monitor(&mut self) {
        let device_id = self.monitor.device_id();
        self.enqueue(Job::RefreshMonitor { device_id });
    }

    fn reload_config(&mut self) {
        let reloaded = config::load_config().and_then(|config| {
            let menu = RadialMenu::new(&config.wheel)?;
            Ok((config, menu))
        });

        match reloaded {
            Ok((config, menu)) => {
                if config.api.base_url != self.config.api.base_url {
                    log::warn!("API base URL changes take effect after restart");
                }
                self.history.set_capacity(config.history.capacity);
                let device_changed = self.monitor.reconfigure(&config.monitor);
                *self.menu.borrow_mut() = menu;
                self.config = config;
                if device_changed {
                    self.refresh_monitor();
                }
                self.drawing_area.queue_draw();
                log::info!("Configuration reloaded");
            }
            Err(e) => log::error!("Failed to reload config: {}", e),
        }
    }
}
