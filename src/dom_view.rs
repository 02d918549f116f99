use gloo::console;
use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement, HtmlSelectElement};

use queens_quadrille_core::{Cell, Command, Piece, Snapshot, TargetMode, BOARD_CELLS, BOARD_COLS};

use crate::runtime::{BoardView, ViewHooks};

pub(crate) const NOTICE_DISMISS_MS: u32 = 5_000;

const PIECE_ASSET_BASE: &str = "https://lichess1.org/assets/piece/cburnett/";

const VIEW_MODE_HINT: &str = "Goal: Move the Queen to the targets";
const EDIT_MODE_HINT: &str = "Edit Mode - Click squares to place pieces";

fn piece_asset_url(piece: Piece) -> String {
    format!("{PIECE_ASSET_BASE}w{}.svg", piece.symbol())
}

fn parse_palette_symbol(raw: &str) -> Cell {
    raw.trim().chars().next().and_then(Piece::from_symbol)
}

pub(crate) struct DomView {
    document: Document,
    squares: Vec<Element>,
    target_list: Element,
    target_select: HtmlSelectElement,
    custom_target_group: Element,
    custom_targets: HtmlInputElement,
    play_pause: Element,
    speed_slider: HtmlInputElement,
    speed_display: Element,
    progress_fill: HtmlElement,
    current_moves: Element,
    current_step: Element,
    solve_time: Element,
    board_mode: Element,
    edit_mode_btn: Element,
    piece_palette: Element,
    palette_buttons: Vec<(Cell, Element)>,
    loading_overlay: Element,
    error_message: Element,
    error_text: Element,
    listeners: Vec<EventListener>,
    notice_timer: Option<Timeout>,
}

fn element(document: &Document, id: &str) -> Option<Element> {
    let found = document.get_element_by_id(id);
    if found.is_none() {
        console::warn!("missing element", id.to_string());
    }
    found
}

impl DomView {
    pub(crate) fn mount(document: Document) -> Option<Self> {
        let board = element(&document, "chess-board")?;
        let mut squares = Vec::with_capacity(BOARD_CELLS);
        board.set_inner_html("");
        for index in 0..BOARD_CELLS {
            let square = document.create_element("div").ok()?;
            square.set_class_name(&square_classes(index, false, false, false));
            square
                .set_attribute("data-position", &index.to_string())
                .ok()?;
            board.append_child(&square).ok()?;
            squares.push(square);
        }

        let mut palette_buttons = Vec::new();
        let buttons = document.query_selector_all(".piece-btn").ok()?;
        for index in 0..buttons.length() {
            let Some(button) = buttons.item(index).and_then(|node| node.dyn_into::<Element>().ok())
            else {
                continue;
            };
            let cell = parse_palette_symbol(&button.get_attribute("data-piece").unwrap_or_default());
            palette_buttons.push((cell, button));
        }

        Some(Self {
            squares,
            target_list: element(&document, "target-list")?,
            target_select: element(&document, "target-select")?
                .dyn_into::<HtmlSelectElement>()
                .ok()?,
            custom_target_group: element(&document, "custom-target-group")?,
            custom_targets: element(&document, "custom-targets")?
                .dyn_into::<HtmlInputElement>()
                .ok()?,
            play_pause: element(&document, "play-pause-btn")?,
            speed_slider: element(&document, "speed-slider")?
                .dyn_into::<HtmlInputElement>()
                .ok()?,
            speed_display: element(&document, "speed-display")?,
            progress_fill: element(&document, "progress-fill")?
                .dyn_into::<HtmlElement>()
                .ok()?,
            current_moves: element(&document, "current-moves")?,
            current_step: element(&document, "current-step")?,
            solve_time: element(&document, "solve-time")?,
            board_mode: element(&document, "board-mode-indicator")?,
            edit_mode_btn: element(&document, "edit-mode-btn")?,
            piece_palette: element(&document, "piece-palette")?,
            palette_buttons,
            loading_overlay: element(&document, "loading-overlay")?,
            error_message: element(&document, "error-message")?,
            error_text: element(&document, "error-text")?,
            listeners: Vec::new(),
            notice_timer: None,
            document,
        })
    }

    fn listen(&mut self, target: &Element, event: &'static str, callback: impl Fn() + 'static) {
        self.listeners
            .push(EventListener::new(target, event, move |_| callback()));
    }

    fn listen_by_id(
        &mut self,
        id: &str,
        event: &'static str,
        hooks: &ViewHooks,
        command: impl Fn() -> Command + 'static,
    ) {
        let Some(target) = element(&self.document, id) else {
            return;
        };
        let on_command = hooks.on_command.clone();
        self.listen(&target, event, move || on_command(command()));
    }

    fn render_board(&self, snapshot: &Snapshot) {
        for (index, square) in self.squares.iter().enumerate() {
            let cell = snapshot.board.cell(index);
            let on_target = snapshot.targets.contains(&index);
            let queen_on_target = on_target && cell == Some(Piece::Queen);
            square.set_class_name(&square_classes(
                index,
                on_target,
                queen_on_target,
                snapshot.edit_mode,
            ));
            square.set_inner_html("");
            if let Some(piece) = cell {
                if let Ok(img) = self.document.create_element("img") {
                    img.set_class_name("lichess-piece");
                    let _ = img.set_attribute("src", &piece_asset_url(piece));
                    let _ = img.set_attribute("alt", &piece.symbol().to_string());
                    let _ = square.append_child(&img);
                }
            }
        }
    }

    fn render_target_list(&self, snapshot: &Snapshot) {
        self.target_list.set_inner_html("");
        if snapshot.targets.is_empty() {
            self.target_list
                .set_inner_html("<div class=\"target-placeholder\">No targets active</div>");
            return;
        }
        for target in &snapshot.targets {
            let Ok(item) = self.document.create_element("div") else {
                continue;
            };
            let visited = snapshot.visited.contains(target);
            let state = if visited { "visited" } else { "pending" };
            let icon = if visited { "\u{2705}" } else { "\u{1F3AF}" };
            item.set_class_name(&format!("target-item {state}"));
            item.set_inner_html(&format!(
                "<span class=\"target-icon\">{icon}</span> Target {target}"
            ));
            let _ = self.target_list.append_child(&item);
        }
    }

    fn render_controls(&self, snapshot: &Snapshot) {
        self.play_pause
            .set_text_content(Some(if snapshot.playing { "\u{23F8}" } else { "\u{25B6}" }));
        self.current_moves
            .set_text_content(Some(&snapshot.move_count.to_string()));
        self.current_step.set_text_content(Some(&snapshot.step_label));
        self.solve_time
            .set_text_content(Some(&format!("{} ms", snapshot.solve_time_ms)));
        self.speed_display.set_text_content(Some(&snapshot.speed_label));
        let _ = self
            .progress_fill
            .style()
            .set_property("width", &format!("{}%", snapshot.progress_percent));

        set_hidden(&self.custom_target_group, snapshot.target_mode != TargetMode::Custom);
        set_hidden(&self.piece_palette, !snapshot.edit_mode);
        set_hidden(&self.loading_overlay, !snapshot.busy);

        self.edit_mode_btn.set_text_content(Some(if snapshot.edit_mode {
            "View Mode"
        } else {
            "Edit Board"
        }));
        self.board_mode.set_text_content(Some(if snapshot.edit_mode {
            EDIT_MODE_HINT
        } else {
            VIEW_MODE_HINT
        }));

        for (cell, button) in &self.palette_buttons {
            let active = snapshot.edit_mode && *cell == snapshot.selected;
            let class = if active { "piece-btn active" } else { "piece-btn" };
            button.set_class_name(class);
        }
    }

}

impl BoardView for DomView {
    // Builds the page wiring: every control dispatches one command.
    fn init(&mut self, hooks: ViewHooks) {
        for (index, square) in self.squares.iter().cloned().enumerate() {
            let on_command = hooks.on_command.clone();
            self.listeners.push(EventListener::new(&square, "click", move |_| {
                on_command(Command::SetCell { position: index });
            }));
        }

        let select = self.target_select.clone();
        let on_command = hooks.on_command.clone();
        self.listeners.push(EventListener::new(&select.clone(), "change", move |_| {
            let mode = TargetMode::from_key(&select.value()).unwrap_or(TargetMode::Corners);
            on_command(Command::SetTargetMode(mode));
        }));

        let input = self.custom_targets.clone();
        let on_command = hooks.on_command.clone();
        self.listeners.push(EventListener::new(&input.clone(), "change", move |_| {
            on_command(Command::SetCustomTargets(input.value()));
        }));

        let slider = self.speed_slider.clone();
        let on_command = hooks.on_command.clone();
        self.listeners.push(EventListener::new(&slider.clone(), "input", move |_| {
            if let Ok(position) = slider.value().parse::<f64>() {
                on_command(Command::SetSpeed {
                    position: position as u32,
                });
            }
        }));

        for (cell, button) in self.palette_buttons.clone() {
            let on_command = hooks.on_command.clone();
            self.listeners.push(EventListener::new(&button, "click", move |_| {
                on_command(Command::SelectPiece(cell));
            }));
        }

        self.listen_by_id("random-btn", "click", &hooks, || Command::RequestGenerate);
        self.listen_by_id("play-pause-btn", "click", &hooks, || Command::TogglePlay);
        self.listen_by_id("prev-btn", "click", &hooks, || Command::Previous);
        self.listen_by_id("next-btn", "click", &hooks, || Command::Next);
        self.listen_by_id("first-btn", "click", &hooks, || Command::GoToFirst);
        self.listen_by_id("last-btn", "click", &hooks, || Command::GoToLast);
        self.listen_by_id("edit-mode-btn", "click", &hooks, || Command::ToggleEdit);
        self.listen_by_id("clear-board-btn", "click", &hooks, || Command::ClearBoard);
        self.listen_by_id("solve-board-btn", "click", &hooks, || Command::RequestSolve);
        self.listen_by_id("exit-edit-btn", "click", &hooks, || Command::ExitEdit);

        if let Some(close) = element(&self.document, "close-error") {
            let message = self.error_message.clone();
            self.listen(&close, "click", move || {
                let _ = message.class_list().add_1("hidden");
            });
        }
    }

    fn render(&mut self, snapshot: &Snapshot) {
        self.render_board(snapshot);
        self.render_target_list(snapshot);
        self.render_controls(snapshot);
    }

    fn notice(&mut self, message: &str) {
        self.error_text.set_text_content(Some(message));
        let _ = self.error_message.class_list().remove_1("hidden");
        let element = self.error_message.clone();
        // Replacing the timer drops the previous one, so a new notice always
        // restarts the dismissal window.
        self.notice_timer = Some(Timeout::new(NOTICE_DISMISS_MS, move || {
            let _ = element.class_list().add_1("hidden");
        }));
    }
}

fn square_classes(index: usize, on_target: bool, queen_on_target: bool, edit_mode: bool) -> String {
    let row = index / BOARD_COLS;
    let col = index % BOARD_COLS;
    let mut classes = String::from("chess-square");
    classes.push(' ');
    classes.push_str(if (row + col) % 2 == 0 { "light" } else { "dark" });
    if on_target {
        classes.push_str(" target-highlight");
    }
    if queen_on_target {
        classes.push_str(" queen-on-target");
    }
    if edit_mode {
        classes.push_str(" clickable");
    }
    classes
}

fn set_hidden(element: &Element, hidden: bool) {
    let list = element.class_list();
    if hidden {
        let _ = list.add_1("hidden");
    } else {
        let _ = list.remove_1("hidden");
    }
}
