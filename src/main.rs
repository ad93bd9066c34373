//! Animal Fun entry point
//!
//! Handles platform-specific initialization, DOM wiring and the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use animal_fun::audio::AudioManager;
    use animal_fun::games::free_draw::PALETTE;
    use animal_fun::platform::input::{mouse_position, touch_position};
    use animal_fun::platform::{LocalStorage, PointerInput, now_ms};
    use animal_fun::renderer::Renderer;
    use animal_fun::shell::{Feedback, View};
    use animal_fun::{Difficulty, ProfileStore, Shell, ViewKind, share};

    /// Largest play area, matching the layout of the page
    const MAX_CANVAS: (f64, f64) = (800.0, 500.0);

    /// App instance holding all state
    struct App {
        shell: Shell,
        renderer: Renderer,
        audio: AudioManager,
        canvas: HtmlCanvasElement,
        document: Document,
        audio_unlocked: bool,
        // Last DOM state written, to skip redundant updates
        shown_view: Option<ViewKind>,
        shown_header: String,
        shown_collection: Option<usize>,
    }

    impl App {
        fn dispatch(&mut self, feedback: Vec<Feedback>) {
            for item in feedback {
                match item {
                    Feedback::Play(effect) => self.audio.play(effect),
                    Feedback::SaveDrawing => {
                        let (hour, minute) = share::local_time();
                        let name = self.shell.drawing_filename(hour, minute);
                        share::export_canvas(self.canvas.clone(), &name);
                    }
                }
            }
        }

        /// Browsers keep audio suspended until the first gesture
        fn unlock_audio(&mut self) {
            if !self.audio_unlocked {
                self.audio.resume();
                self.audio_unlocked = true;
            }
        }

        fn pointer(&mut self, input: PointerInput) {
            let feedback = self.shell.pointer(input, now_ms());
            self.dispatch(feedback);
        }

        fn frame(&mut self, now: f64) {
            let feedback = self.shell.update(now);
            self.dispatch(feedback);
            let ops = self.shell.take_brush_ops();
            self.renderer.render(&self.shell, &ops, now);
            self.sync_header();
        }

        /// Show the right panel and refresh menu widgets after a view change
        fn sync_dom(&mut self) {
            let kind = self.shell.view_kind();
            let in_menu = kind == ViewKind::Menu;
            set_hidden(&self.document, "menu", !in_menu);
            set_hidden(&self.document, "game", in_menu);
            set_hidden(&self.document, "draw-tools", kind != ViewKind::FreeDraw);
            set_hidden(&self.document, "palette", kind != ViewKind::FreeDraw);
            self.shown_view = Some(kind);

            if in_menu {
                self.sync_menu();
            } else {
                self.sync_palette();
            }
            self.sync_header();
        }

        fn sync_menu(&mut self) {
            let store = self.shell.store();
            set_text(&self.document, "total-stars", &format!("⭐ {}", store.total_stars()));

            let current = store.difficulty().as_str();
            for_each_selected(&self.document, ".diff-btn", |btn| {
                let active = btn.get_attribute("data-difficulty").as_deref() == Some(current);
                let _ = btn.class_list().toggle_with_force("active", active);
            });

            let sound = if store.sound_enabled() { "🔊 ON" } else { "🔇 OFF" };
            set_text(&self.document, "sound-btn", sound);

            let collected = store.collected_animals();
            set_hidden(&self.document, "collection", collected.is_empty());
            if self.shown_collection != Some(collected.len()) {
                set_text(
                    &self.document,
                    "collection-count",
                    &format!("My Collection ({}):", collected.len()),
                );
                if let Some(row) = self.document.get_element_by_id("collection-row") {
                    row.set_inner_html("");
                    for glyph in collected {
                        if let Ok(btn) = self.document.create_element("button") {
                            btn.set_class_name("animal-btn");
                            btn.set_text_content(Some(glyph));
                            let _ = row.append_child(&btn);
                        }
                    }
                }
                self.shown_collection = Some(collected.len());
            }
        }

        fn sync_palette(&self) {
            let selected = match self.shell.view() {
                View::FreeDraw(g) => g.color_index(),
                _ => return,
            };
            for_each_selected(&self.document, ".color-btn", |btn| {
                let index = btn
                    .get_attribute("data-color")
                    .and_then(|v| v.parse::<usize>().ok());
                let _ = btn
                    .class_list()
                    .toggle_with_force("selected", index == Some(selected));
            });
        }

        fn sync_header(&mut self) {
            if self.shown_view != Some(ViewKind::Menu) {
                let header = format!(
                    "{}|{}",
                    self.shell.title(),
                    "⭐".repeat(self.shell.session_stars() as usize)
                );
                if header != self.shown_header {
                    set_text(&self.document, "game-title", &self.shell.title());
                    set_text(
                        &self.document,
                        "game-stars",
                        &"⭐".repeat(self.shell.session_stars() as usize),
                    );
                    self.shown_header = header;
                }
            }
        }
    }

    fn set_hidden(document: &Document, id: &str, hidden: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.class_list().toggle_with_force("hidden", hidden);
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn for_each_selected(document: &Document, selector: &str, mut f: impl FnMut(&Element)) {
        let Ok(list) = document.query_selector_all(selector) else {
            return;
        };
        for i in 0..list.length() {
            if let Some(el) = list.item(i).and_then(|n| n.dyn_into::<Element>().ok()) {
                f(&el);
            }
        }
    }

    /// Attribute of the element that received the click (or its nearest ancestor with it)
    fn event_attribute(event: &web_sys::Event, name: &str) -> Option<String> {
        let target: Element = event.target()?.dyn_into().ok()?;
        let holder = target.closest(&format!("[{}]", name)).ok()??;
        holder.get_attribute(name)
    }

    fn on_click(
        document: &Document,
        id: &str,
        app: &Rc<RefCell<App>>,
        handler: fn(&mut App, &web_sys::Event),
    ) {
        let Some(el) = document.get_element_by_id(id) else {
            log::warn!("Missing element #{}", id);
            return;
        };
        let app = app.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
            let mut a = app.borrow_mut();
            a.unlock_audio();
            handler(&mut *a, &event);
        });
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Animal Fun starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Size once at startup; the backing store matches CSS pixels
        let inner = |v: Result<JsValue, JsValue>, fallback: f64| {
            v.ok().and_then(|v| v.as_f64()).unwrap_or(fallback)
        };
        let width = (inner(window.inner_width(), MAX_CANVAS.0) - 40.0).clamp(200.0, MAX_CANVAS.0);
        let height = (inner(window.inner_height(), MAX_CANVAS.1) - 220.0).clamp(200.0, MAX_CANVAS.1);
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);
        let _ = canvas.set_attribute("style", &format!("width:{}px;height:{}px", width as u32, height as u32));
        let size = Vec2::new(width as f32, height as f32);

        let renderer = Renderer::new(&canvas).expect("Failed to get 2d context");
        let store = ProfileStore::load(Box::new(LocalStorage::open()));

        let seed = js_sys::Date::now() as u64;
        let shell = Shell::new(store, size, seed);
        log::info!("Shell initialized with seed: {}", seed);

        let mut audio = AudioManager::new();
        audio.set_muted(!shell.sound_enabled());

        let app = Rc::new(RefCell::new(App {
            shell,
            renderer,
            audio,
            canvas: canvas.clone(),
            document: document.clone(),
            audio_unlocked: false,
            shown_view: None,
            shown_header: String::new(),
            shown_collection: None,
        }));
        app.borrow_mut().sync_dom();

        setup_menu(&document, &app);
        setup_game_controls(&document, &app);
        setup_input_handlers(&canvas, &app);

        request_animation_frame(app);

        log::info!("Animal Fun running!");
    }

    fn setup_menu(document: &Document, app: &Rc<RefCell<App>>) {
        for kind in ViewKind::GAMES.into_iter().chain([ViewKind::Habitat]) {
            let id = format!("btn-{}", kind.as_str());
            on_click(document, &id, app, |a, event| {
                let Some(kind) = event_attribute(event, "data-view").and_then(|v| ViewKind::from_str(&v))
                else {
                    return;
                };
                let feedback = a.shell.select(kind);
                a.dispatch(feedback);
                a.sync_dom();
            });
        }

        for difficulty in Difficulty::ALL {
            let id = format!("diff-{}", difficulty.as_str());
            on_click(document, &id, app, |a, event| {
                let Some(d) = event_attribute(event, "data-difficulty").and_then(|v| Difficulty::from_str(&v))
                else {
                    return;
                };
                let feedback = a.shell.set_difficulty(d);
                a.dispatch(feedback);
                a.sync_dom();
            });
        }

        on_click(document, "sound-btn", app, |a, _| {
            let feedback = a.shell.toggle_sound();
            let muted = !a.shell.sound_enabled();
            a.audio.set_muted(muted);
            a.dispatch(feedback);
            a.sync_dom();
        });

        // Delegated: the row is rebuilt whenever the collection grows
        on_click(document, "collection-row", app, |a, event| {
            let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
                return;
            };
            if let Some(glyph) = target.text_content() {
                let feedback = a.shell.tap_collected(glyph.trim());
                a.dispatch(feedback);
            }
        });
    }

    fn setup_game_controls(document: &Document, app: &Rc<RefCell<App>>) {
        on_click(document, "back-btn", app, |a, _| {
            let feedback = a.shell.back();
            a.dispatch(feedback);
            a.sync_dom();
        });

        on_click(document, "clear-btn", app, |a, _| {
            let feedback = a.shell.clear_drawing(now_ms());
            a.dispatch(feedback);
        });

        on_click(document, "save-btn", app, |a, _| {
            let feedback = a.shell.save_drawing(now_ms());
            a.dispatch(feedback);
        });

        on_click(document, "palette", app, |a, event| {
            let Some(index) = event_attribute(event, "data-color").and_then(|v| v.parse::<usize>().ok())
            else {
                return;
            };
            if index < PALETTE.len() {
                let feedback = a.shell.select_color(index, now_ms());
                a.dispatch(feedback);
                a.sync_palette();
            }
        });

        // Keyboard
        {
            let app = app.clone();
            let window = web_sys::window().expect("no window");
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.key() == "Escape" {
                    let mut a = app.borrow_mut();
                    let before = a.shell.view_kind();
                    let feedback = a.shell.escape();
                    a.dispatch(feedback);
                    if a.shell.view_kind() != before {
                        a.sync_dom();
                    }
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, app: &Rc<RefCell<App>>) {
        // Mouse
        for (event_name, phase) in [
            ("mousedown", 0u8),
            ("mousemove", 1),
            ("mouseup", 2),
            ("mouseleave", 2),
        ] {
            let app = app.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let pos = mouse_position(&event, &canvas_clone);
                let input = match phase {
                    0 => PointerInput::down(pos.x, pos.y),
                    1 => PointerInput::moved(pos.x, pos.y),
                    _ => PointerInput::up(pos.x, pos.y),
                };
                let mut a = app.borrow_mut();
                if phase == 0 {
                    a.unlock_audio();
                }
                a.pointer(input);
            });
            let _ = canvas
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch
        for (event_name, phase) in [
            ("touchstart", 0u8),
            ("touchmove", 1),
            ("touchend", 2),
            ("touchcancel", 2),
        ] {
            let app = app.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let pos = touch_position(&event, &canvas_clone);
                let input = match (phase, pos) {
                    (0, Some(p)) => PointerInput::down(p.x, p.y),
                    (1, Some(p)) => PointerInput::moved(p.x, p.y),
                    (2, _) => PointerInput::up(0.0, 0.0),
                    _ => return,
                };
                let mut a = app.borrow_mut();
                if phase == 0 {
                    a.unlock_audio();
                }
                a.pointer(input);
            });
            let _ = canvas
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            frame_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame_loop(app: Rc<RefCell<App>>, time: f64) {
        app.borrow_mut().frame(time);
        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use animal_fun::platform::MemoryStorage;
    use animal_fun::{ProfileStore, Shell, ViewKind};

    env_logger::init();
    log::info!("Animal Fun (native) starting...");
    log::info!("The games run in the browser - use `trunk serve` for the web version");

    // Smoke run of the shell against in-memory storage
    let store = ProfileStore::load(Box::new(MemoryStorage::new()));
    let mut shell = Shell::new(store, glam::Vec2::new(800.0, 500.0), 42);
    for kind in ViewKind::GAMES {
        shell.select(kind);
        shell.update(16.0);
        log::info!("{}: {}", kind.as_str(), shell.title());
        shell.back();
    }
    println!(
        "Animal Fun core OK: difficulty {}, {} stars",
        shell.difficulty().label(),
        shell.store().total_stars()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
