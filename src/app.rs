use egui::{Key, KeyboardShortcut, Modifiers, Sense};
use log::debug;

use crate::command::{Command, CommandHistory};
use crate::id_generator::IdGenerator;
use crate::panels;
use crate::renderer;
use crate::scene::{Mode, ObserverId, SceneStore};
use crate::tools::{DrawShapeTool, SelectTool, Tool, ToolContext, ToolOutput};

/// Default style applied to newly drawn shapes. This is the only state
/// persisted across runs; the scene itself is not.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct ShapeDefaults {
    pub stroke_color: egui::Color32,
    pub fill_color: egui::Color32,
}

impl Default for ShapeDefaults {
    fn default() -> Self {
        Self {
            stroke_color: egui::Color32::BLACK,
            fill_color: egui::Color32::WHITE,
        }
    }
}

/// The editor session root.
///
/// Owns the scene store, command history, id allocation and gesture tools,
/// and wires them to the eframe host. Everything downstream receives the
/// store by reference; nothing reaches for it through a global.
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ShapeApp {
    defaults: ShapeDefaults,
    #[serde(skip)]
    store: SceneStore,
    #[serde(skip)]
    history: CommandHistory,
    #[serde(skip)]
    ids: IdGenerator,
    #[serde(skip)]
    draw_tool: DrawShapeTool,
    #[serde(skip)]
    select_tool: SelectTool,
    #[serde(skip)]
    repaint_observer: Option<ObserverId>,
}

impl Default for ShapeApp {
    fn default() -> Self {
        Self {
            defaults: ShapeDefaults::default(),
            store: SceneStore::new(),
            history: CommandHistory::new(),
            ids: IdGenerator::new(),
            draw_tool: DrawShapeTool::new(),
            select_tool: SelectTool::new(),
            repaint_observer: None,
        }
    }
}

impl ShapeApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let mut app: ShapeApp = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();

        // Wake the frame loop whenever the scene mutates, so a change made
        // from any code path repaints without waiting for input.
        let egui_ctx = cc.egui_ctx.clone();
        app.repaint_observer = Some(app.store.subscribe(move |_| egui_ctx.request_repaint()));
        app
    }

    pub fn store(&self) -> &SceneStore {
        &self.store
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    pub fn defaults_mut(&mut self) -> &mut ShapeDefaults {
        &mut self.defaults
    }

    /// Execute an undoable command against the scene.
    pub fn execute(&mut self, command: Command) {
        self.history.execute(command, &mut self.store);
    }

    pub fn undo(&mut self) {
        if let Err(err) = self.history.undo(&mut self.store) {
            debug!("{err}");
        }
    }

    pub fn redo(&mut self) {
        if let Err(err) = self.history.redo(&mut self.store) {
            debug!("{err}");
        }
    }

    /// Switch modes, aborting any gesture in flight first.
    pub fn set_mode(&mut self, mode: Mode) {
        self.draw_tool.cancel();
        self.select_tool.cancel();
        self.store.set_mode(mode);
    }

    /// Delete every object, through the history so it is undoable.
    pub fn clear_canvas(&mut self) {
        let ids: Vec<usize> = self.store.state().objects.iter().map(|obj| obj.id).collect();
        if !ids.is_empty() {
            self.execute(Command::delete(ids));
        }
    }

    /// Delete the current selection, through the history.
    pub fn delete_selection(&mut self) {
        let ids: Vec<usize> = self.store.state().selected_ids.iter().copied().collect();
        if !ids.is_empty() {
            self.execute(Command::delete(ids));
        }
    }

    /// Route the canvas response through the active tool's pointer
    /// handlers. egui keeps the drag capture alive when the pointer leaves
    /// the canvas rect, so move/up still arrive until release.
    fn handle_pointer(&mut self, response: &egui::Response, modifiers: Modifiers) {
        self.draw_tool.stroke_color = self.defaults.stroke_color;
        self.draw_tool.fill_color = self.defaults.fill_color;

        let tool: &mut dyn Tool = match self.store.state().mode {
            Mode::Select => &mut self.select_tool,
            _ => &mut self.draw_tool,
        };
        let mut ctx = ToolContext {
            store: &mut self.store,
            ids: &mut self.ids,
        };

        let mut outputs: Vec<ToolOutput> = Vec::new();
        if let Some(pos) = response.interact_pointer_pos() {
            if response.drag_started() {
                outputs.extend(tool.on_pointer_down(pos, modifiers, &mut ctx));
            }
            if response.dragged() {
                outputs.extend(tool.on_pointer_move(pos, &mut ctx));
            }
            if response.drag_stopped() {
                outputs.extend(tool.on_pointer_up(pos, &mut ctx));
            }
        }

        for output in outputs {
            match output {
                ToolOutput::Execute(command) => self.history.execute(command, &mut self.store),
                ToolOutput::Record(command) => self.history.record(command),
            }
        }
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        let undo = KeyboardShortcut::new(Modifiers::COMMAND, Key::Z);
        let redo = KeyboardShortcut::new(Modifiers::COMMAND | Modifiers::SHIFT, Key::Z);
        let redo_alt = KeyboardShortcut::new(Modifiers::COMMAND, Key::Y);

        // Check redo first: its chord is a superset of undo's.
        if ctx.input_mut(|i| i.consume_shortcut(&redo) || i.consume_shortcut(&redo_alt)) {
            self.redo();
        } else if ctx.input_mut(|i| i.consume_shortcut(&undo)) {
            self.undo();
        }

        // Delete only when no text field has focus.
        if !ctx.wants_keyboard_input()
            && ctx.input(|i| i.key_pressed(Key::Delete) || i.key_pressed(Key::Backspace))
        {
            self.delete_selection();
        }
    }
}

impl eframe::App for ShapeApp {
    /// Called by the framework to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, self);
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_shortcuts(ctx);

        panels::tools_panel(self, ctx);
        panels::properties_panel(self, ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            // Sense::drag turns every press into a gesture immediately;
            // a stationary click is just a drag with zero delta.
            let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::drag());
            let modifiers = ui.input(|i| i.modifiers);
            self.handle_pointer(&response, modifiers);

            let preview = match self.store.state().mode {
                Mode::Select => None,
                _ => self.draw_tool.preview(),
            };
            renderer::render(&painter, response.rect, self.store.state(), preview);
        });
    }
}
