use eframe_shapes::command::CommandHistory;
use eframe_shapes::scene::{Mode, SceneStore};
use eframe_shapes::shape::{Shape, ShapeKind};
use eframe_shapes::tools::{DrawShapeTool, SelectTool, Tool, ToolContext, ToolOutput};
use eframe_shapes::IdGenerator;
use egui::{pos2, Color32, Modifiers, Pos2};

struct Session {
    store: SceneStore,
    history: CommandHistory,
    ids: IdGenerator,
}

impl Session {
    fn new(mode: Mode) -> Self {
        let mut store = SceneStore::new();
        store.set_mode(mode);
        Self {
            store,
            history: CommandHistory::new(),
            ids: IdGenerator::new(),
        }
    }

    fn ctx(&mut self) -> ToolContext<'_> {
        ToolContext {
            store: &mut self.store,
            ids: &mut self.ids,
        }
    }

    // What the app does with a tool output.
    fn apply(&mut self, output: Option<ToolOutput>) {
        match output {
            Some(ToolOutput::Execute(command)) => self.history.execute(command, &mut self.store),
            Some(ToolOutput::Record(command)) => self.history.record(command),
            None => {}
        }
    }

    fn pointer_down(&mut self, tool: &mut dyn Tool, pos: Pos2, modifiers: Modifiers) {
        let output = {
            let mut ctx = self.ctx();
            tool.on_pointer_down(pos, modifiers, &mut ctx)
        };
        self.apply(output);
    }

    fn pointer_move(&mut self, tool: &mut dyn Tool, pos: Pos2) {
        let output = {
            let mut ctx = self.ctx();
            tool.on_pointer_move(pos, &mut ctx)
        };
        self.apply(output);
    }

    fn pointer_up(&mut self, tool: &mut dyn Tool, pos: Pos2) {
        let output = {
            let mut ctx = self.ctx();
            tool.on_pointer_up(pos, &mut ctx)
        };
        self.apply(output);
    }
}

fn committed_shape(id: usize, kind: ShapeKind, start: Pos2, current: Pos2, z_index: i32) -> Shape {
    let mut shape = Shape::new(id, kind, start, Color32::BLACK, Color32::WHITE);
    shape.current = current;
    shape.z_index = z_index;
    shape
}

#[test]
fn draw_gesture_commits_only_on_release() {
    let mut session = Session::new(Mode::Rectangle);
    let mut tool = DrawShapeTool::new();

    session.pointer_down(&mut tool, pos2(10.0, 10.0), Modifiers::NONE);
    assert!(tool.is_active());
    // The provisional shape is the tool's alone; the shared scene stays
    // empty until release.
    assert!(session.store.state().objects.is_empty());

    session.pointer_move(&mut tool, pos2(30.0, 20.0));
    session.pointer_move(&mut tool, pos2(50.0, 40.0));
    assert!(session.store.state().objects.is_empty());
    assert_eq!(tool.preview().unwrap().current, pos2(50.0, 40.0));

    session.pointer_up(&mut tool, pos2(50.0, 40.0));
    assert!(!tool.is_active());
    assert!(tool.preview().is_none());

    let objects = &session.store.state().objects;
    assert_eq!(objects.len(), 1);
    assert_eq!(objects[0].id, 1);
    assert_eq!(objects[0].kind, ShapeKind::Rectangle);
    assert_eq!(objects[0].start, pos2(10.0, 10.0));
    assert_eq!(objects[0].current, pos2(50.0, 40.0));
    assert_eq!(objects[0].z_index, 1);
    assert!(session.history.can_undo());
}

#[test]
fn each_drawing_mode_commits_its_kind() {
    for (mode, kind) in [
        (Mode::Line, ShapeKind::Line),
        (Mode::Rectangle, ShapeKind::Rectangle),
        (Mode::Circle, ShapeKind::Circle),
    ] {
        let mut session = Session::new(mode);
        let mut tool = DrawShapeTool::new();

        session.pointer_down(&mut tool, pos2(0.0, 0.0), Modifiers::NONE);
        session.pointer_up(&mut tool, pos2(10.0, 10.0));

        assert_eq!(session.store.state().objects[0].kind, kind);
    }
}

#[test]
fn click_without_movement_commits_a_degenerate_shape() {
    let mut session = Session::new(Mode::Line);
    let mut tool = DrawShapeTool::new();

    session.pointer_down(&mut tool, pos2(5.0, 5.0), Modifiers::NONE);
    session.pointer_up(&mut tool, pos2(5.0, 5.0));

    let objects = &session.store.state().objects;
    assert_eq!(objects.len(), 1);
    assert_eq!(objects[0].start, objects[0].current);
}

#[test]
fn cancelled_draw_gesture_commits_nothing_and_burns_the_id() {
    let mut session = Session::new(Mode::Circle);
    let mut tool = DrawShapeTool::new();

    session.pointer_down(&mut tool, pos2(0.0, 0.0), Modifiers::NONE);
    tool.cancel();
    session.pointer_up(&mut tool, pos2(9.0, 9.0));
    assert!(session.store.state().objects.is_empty());

    // The allocated id is gone for good; the next gesture gets a fresh one.
    session.pointer_down(&mut tool, pos2(0.0, 0.0), Modifiers::NONE);
    session.pointer_up(&mut tool, pos2(3.0, 4.0));
    assert_eq!(session.store.state().objects[0].id, 2);
}

#[test]
fn select_click_picks_the_highest_z_index_among_hits() {
    let mut session = Session::new(Mode::Select);
    // Rectangle below, circle on top, both covering the click point.
    session.store.add_object(committed_shape(
        1,
        ShapeKind::Rectangle,
        pos2(0.0, 0.0),
        pos2(40.0, 40.0),
        1,
    ));
    session.store.add_object(committed_shape(
        2,
        ShapeKind::Circle,
        pos2(20.0, 20.0),
        pos2(35.0, 20.0),
        2,
    ));
    let mut tool = SelectTool::new();

    session.pointer_down(&mut tool, pos2(20.0, 20.0), Modifiers::NONE);
    session.pointer_up(&mut tool, pos2(20.0, 20.0));

    let selected: Vec<usize> = session.store.state().selected_ids.iter().copied().collect();
    assert_eq!(selected, vec![2]);
}

#[test]
fn shift_click_unions_into_the_selection() {
    let mut session = Session::new(Mode::Select);
    session.store.add_object(committed_shape(
        1,
        ShapeKind::Rectangle,
        pos2(0.0, 0.0),
        pos2(10.0, 10.0),
        1,
    ));
    session.store.add_object(committed_shape(
        2,
        ShapeKind::Rectangle,
        pos2(100.0, 100.0),
        pos2(110.0, 110.0),
        2,
    ));
    let mut tool = SelectTool::new();

    session.pointer_down(&mut tool, pos2(5.0, 5.0), Modifiers::NONE);
    session.pointer_up(&mut tool, pos2(5.0, 5.0));
    session.pointer_down(&mut tool, pos2(105.0, 105.0), Modifiers::SHIFT);
    session.pointer_up(&mut tool, pos2(105.0, 105.0));

    let selected: Vec<usize> = session.store.state().selected_ids.iter().copied().collect();
    assert_eq!(selected, vec![1, 2]);
}

#[test]
fn plain_click_replaces_the_selection() {
    let mut session = Session::new(Mode::Select);
    session.store.add_object(committed_shape(
        1,
        ShapeKind::Rectangle,
        pos2(0.0, 0.0),
        pos2(10.0, 10.0),
        1,
    ));
    session.store.add_object(committed_shape(
        2,
        ShapeKind::Rectangle,
        pos2(100.0, 100.0),
        pos2(110.0, 110.0),
        2,
    ));
    session.store.set_selected_ids([1]);
    let mut tool = SelectTool::new();

    session.pointer_down(&mut tool, pos2(105.0, 105.0), Modifiers::NONE);
    session.pointer_up(&mut tool, pos2(105.0, 105.0));

    let selected: Vec<usize> = session.store.state().selected_ids.iter().copied().collect();
    assert_eq!(selected, vec![2]);
}

#[test]
fn empty_space_click_clears_unless_shift_is_held() {
    let mut session = Session::new(Mode::Select);
    session.store.add_object(committed_shape(
        1,
        ShapeKind::Rectangle,
        pos2(0.0, 0.0),
        pos2(10.0, 10.0),
        1,
    ));
    session.store.set_selected_ids([1]);
    let mut tool = SelectTool::new();

    session.pointer_down(&mut tool, pos2(500.0, 500.0), Modifiers::SHIFT);
    assert!(!tool.is_active());
    assert_eq!(session.store.state().selected_ids.len(), 1);

    session.pointer_down(&mut tool, pos2(500.0, 500.0), Modifiers::NONE);
    assert!(!tool.is_active());
    assert!(session.store.state().selected_ids.is_empty());
}

#[test]
fn drag_moves_by_total_delta_and_records_one_command() {
    let mut session = Session::new(Mode::Select);
    session.store.add_object(committed_shape(
        1,
        ShapeKind::Rectangle,
        pos2(10.0, 10.0),
        pos2(50.0, 40.0),
        1,
    ));
    let mut tool = SelectTool::new();

    session.pointer_down(&mut tool, pos2(20.0, 20.0), Modifiers::NONE);
    assert!(tool.is_active());
    session.pointer_move(&mut tool, pos2(25.0, 20.0));
    session.pointer_move(&mut tool, pos2(30.0, 17.0));
    session.pointer_up(&mut tool, pos2(30.0, 17.0));

    // Moved by the delta from the gesture origin, not a sum of per-event
    // deltas.
    let moved = session.store.state().find(1).unwrap();
    assert_eq!(moved.start, pos2(20.0, 7.0));
    assert_eq!(moved.current, pos2(60.0, 37.0));

    // One history entry for the whole gesture; undo restores the origin.
    assert_eq!(session.history.undo_stack().len(), 1);
    session.history.undo(&mut session.store).unwrap();
    let restored = session.store.state().find(1).unwrap();
    assert_eq!(restored.start, pos2(10.0, 10.0));
    assert_eq!(restored.current, pos2(50.0, 40.0));
}

#[test]
fn shift_drag_moves_the_whole_union() {
    let mut session = Session::new(Mode::Select);
    session.store.add_object(committed_shape(
        1,
        ShapeKind::Rectangle,
        pos2(0.0, 0.0),
        pos2(10.0, 10.0),
        1,
    ));
    session.store.add_object(committed_shape(
        2,
        ShapeKind::Rectangle,
        pos2(100.0, 100.0),
        pos2(110.0, 110.0),
        2,
    ));
    let mut tool = SelectTool::new();

    session.pointer_down(&mut tool, pos2(5.0, 5.0), Modifiers::NONE);
    session.pointer_up(&mut tool, pos2(5.0, 5.0));

    session.pointer_down(&mut tool, pos2(105.0, 105.0), Modifiers::SHIFT);
    session.pointer_move(&mut tool, pos2(115.0, 105.0));
    session.pointer_up(&mut tool, pos2(115.0, 105.0));

    assert_eq!(session.store.state().find(1).unwrap().start, pos2(10.0, 0.0));
    assert_eq!(
        session.store.state().find(2).unwrap().start,
        pos2(110.0, 100.0)
    );
}

#[test]
fn click_on_object_without_movement_records_nothing() {
    let mut session = Session::new(Mode::Select);
    session.store.add_object(committed_shape(
        1,
        ShapeKind::Rectangle,
        pos2(0.0, 0.0),
        pos2(10.0, 10.0),
        1,
    ));
    let mut tool = SelectTool::new();

    session.pointer_down(&mut tool, pos2(5.0, 5.0), Modifiers::NONE);
    session.pointer_up(&mut tool, pos2(5.0, 5.0));

    assert!(!session.history.can_undo());
    assert_eq!(session.store.state().find(1).unwrap().start, pos2(0.0, 0.0));
}

#[test]
fn line_selection_uses_the_infinite_line_rule() {
    let mut session = Session::new(Mode::Select);
    session.store.add_object(committed_shape(
        1,
        ShapeKind::Line,
        pos2(0.0, 0.0),
        pos2(10.0, 0.0),
        1,
    ));
    let mut tool = SelectTool::new();

    // Far past the endpoint, but squarely on the infinite line.
    session.pointer_down(&mut tool, pos2(100.0, 0.0), Modifiers::NONE);
    session.pointer_up(&mut tool, pos2(100.0, 0.0));

    assert_eq!(session.store.state().selected_ids.len(), 1);
}
