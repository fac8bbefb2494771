//! Undoable level mutations.
//!
//! Every change a tool makes to the grid, the object layer or the tile
//! selection is expressed as an [`EditorCommand`]. A command records whatever
//! it needs during `apply` so that `undo` restores the level exactly, and a
//! second `apply` after `undo` redoes the change.

use crate::grid::{TileEdit, TileStack};
use crate::level::Level;
use crate::objects::{ObjectInstance, ZOrder};
use crate::selection::{SelectionMode, TileSelection, TileSelectionSnapshot};
use tilekit_core::{Point, TileCoord};
use uuid::Uuid;

#[derive(Debug, Clone)]
#[allow(clippy::large_enum_variant)]
pub enum EditorCommand {
    ReplaceTiles(ReplaceTiles),
    SelectTiles(SelectTiles),
    DeselectTiles(DeselectTiles),
    FloatTileSelection(FloatTileSelection),
    DefloatTileSelection(DefloatTileSelection),
    MoveTileSelection(MoveTileSelection),
    DeleteTileSelection(DeleteTileSelection),
    CreateFloatingSelection(CreateFloatingSelection),
    AddObjects(AddObjects),
    RemoveObjects(RemoveObjects),
    MoveObjects(MoveObjects),
    ReorderObjects(ReorderObjects),
    Compound(CompoundCommand),
}

/// Cell edits already made to the grid by a gesture, or to be made on redo.
#[derive(Debug, Clone)]
pub struct ReplaceTiles {
    pub label: String,
    pub edits: Vec<TileEdit>,
}

#[derive(Debug, Clone, Default)]
pub struct SelectTiles {
    pub coords: Vec<TileCoord>,
    added: Vec<TileCoord>,
    activated: bool,
}

#[derive(Debug, Clone, Default)]
pub struct DeselectTiles {
    pub coords: Vec<TileCoord>,
    removed: Vec<(TileCoord, TileStack)>,
}

/// Lifts the selected cells out of the grid into the selection.
#[derive(Debug, Clone, Default)]
pub struct FloatTileSelection {
    lifted: Vec<TileEdit>,
    replaced: Vec<(TileCoord, TileStack)>,
    prior_mode: SelectionMode,
}

/// Writes the floating stacks back into the grid at the selection's origin.
#[derive(Debug, Clone, Default)]
pub struct DefloatTileSelection {
    overwritten: Vec<TileEdit>,
}

#[derive(Debug, Clone)]
pub struct MoveTileSelection {
    pub from: TileCoord,
    pub to: TileCoord,
}

/// Discards the selection's contents. Grid cells are left untouched.
#[derive(Debug, Clone, Default)]
pub struct DeleteTileSelection {
    snapshot: Option<TileSelectionSnapshot>,
}

/// Replaces the selection with a new floating one, as a paste does.
#[derive(Debug, Clone)]
pub struct CreateFloatingSelection {
    pub tiles: Vec<(TileCoord, TileStack)>,
    previous: Option<TileSelectionSnapshot>,
}

#[derive(Debug, Clone)]
pub struct AddObjects {
    pub instances: Vec<ObjectInstance>,
}

#[derive(Debug, Clone)]
pub struct RemoveObjects {
    pub ids: Vec<Uuid>,
    removed: Vec<(usize, ObjectInstance)>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectMove {
    pub id: Uuid,
    pub from: Point,
    pub to: Point,
}

#[derive(Debug, Clone)]
pub struct MoveObjects {
    pub moves: Vec<ObjectMove>,
}

/// Z-order moves applied in sequence.
#[derive(Debug, Clone)]
pub struct ReorderObjects {
    pub ops: Vec<(Uuid, ZOrder)>,
    previous: Vec<Uuid>,
}

/// Sub-commands applied in order and undone in reverse, as one history entry.
#[derive(Debug, Clone)]
pub struct CompoundCommand {
    pub name: String,
    pub commands: Vec<EditorCommand>,
}

impl ReplaceTiles {
    pub fn new(label: impl Into<String>, edits: Vec<TileEdit>) -> Self {
        Self {
            label: label.into(),
            edits,
        }
    }
}

impl SelectTiles {
    pub fn new(coords: Vec<TileCoord>) -> Self {
        Self {
            coords,
            ..Self::default()
        }
    }
}

impl DeselectTiles {
    pub fn new(coords: Vec<TileCoord>) -> Self {
        Self {
            coords,
            ..Self::default()
        }
    }
}

impl CreateFloatingSelection {
    pub fn new(tiles: Vec<(TileCoord, TileStack)>) -> Self {
        Self {
            tiles,
            previous: None,
        }
    }
}

impl RemoveObjects {
    pub fn new(ids: Vec<Uuid>) -> Self {
        Self {
            ids,
            removed: Vec::new(),
        }
    }
}

impl ReorderObjects {
    pub fn new(ops: Vec<(Uuid, ZOrder)>) -> Self {
        Self {
            ops,
            previous: Vec::new(),
        }
    }
}

impl CompoundCommand {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            commands: Vec::new(),
        }
    }

    pub fn push(&mut self, command: EditorCommand) {
        self.commands.push(command);
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl EditorCommand {
    pub fn replace_tiles(label: impl Into<String>, edits: Vec<TileEdit>) -> Self {
        Self::ReplaceTiles(ReplaceTiles::new(label, edits))
    }

    pub fn select_tiles(coords: Vec<TileCoord>) -> Self {
        Self::SelectTiles(SelectTiles::new(coords))
    }

    pub fn deselect_tiles(coords: Vec<TileCoord>) -> Self {
        Self::DeselectTiles(DeselectTiles::new(coords))
    }

    pub fn float_selection() -> Self {
        Self::FloatTileSelection(FloatTileSelection::default())
    }

    pub fn defloat_selection() -> Self {
        Self::DefloatTileSelection(DefloatTileSelection::default())
    }

    pub fn move_selection(from: TileCoord, to: TileCoord) -> Self {
        Self::MoveTileSelection(MoveTileSelection { from, to })
    }

    pub fn delete_selection() -> Self {
        Self::DeleteTileSelection(DeleteTileSelection::default())
    }

    pub fn create_floating(tiles: Vec<(TileCoord, TileStack)>) -> Self {
        Self::CreateFloatingSelection(CreateFloatingSelection::new(tiles))
    }

    pub fn add_objects(instances: Vec<ObjectInstance>) -> Self {
        Self::AddObjects(AddObjects { instances })
    }

    pub fn remove_objects(ids: Vec<Uuid>) -> Self {
        Self::RemoveObjects(RemoveObjects::new(ids))
    }

    pub fn move_objects(moves: Vec<ObjectMove>) -> Self {
        Self::MoveObjects(MoveObjects { moves })
    }

    pub fn reorder_objects(ops: Vec<(Uuid, ZOrder)>) -> Self {
        Self::ReorderObjects(ReorderObjects::new(ops))
    }

    /// Wraps several steps as one entry; a single step is returned unwrapped.
    pub fn compound(name: impl Into<String>, mut commands: Vec<EditorCommand>) -> Self {
        if commands.len() == 1 {
            if let Some(command) = commands.pop() {
                return command;
            }
        }
        Self::Compound(CompoundCommand {
            name: name.into(),
            commands,
        })
    }

    /// Display name for history menus.
    pub fn name(&self) -> &str {
        match self {
            EditorCommand::ReplaceTiles(cmd) => &cmd.label,
            EditorCommand::SelectTiles(_) => "Select Tiles",
            EditorCommand::DeselectTiles(_) => "Deselect Tiles",
            EditorCommand::FloatTileSelection(_) => "Float Selection",
            EditorCommand::DefloatTileSelection(_) => "Defloat Selection",
            EditorCommand::MoveTileSelection(_) => "Move Selection",
            EditorCommand::DeleteTileSelection(_) => "Delete Selection",
            EditorCommand::CreateFloatingSelection(_) => "Paste Tiles",
            EditorCommand::AddObjects(_) => "Add Objects",
            EditorCommand::RemoveObjects(_) => "Remove Objects",
            EditorCommand::MoveObjects(_) => "Move Objects",
            EditorCommand::ReorderObjects(_) => "Reorder Objects",
            EditorCommand::Compound(cmd) => &cmd.name,
        }
    }

    /// True if applying the command would change nothing.
    pub fn is_empty(&self) -> bool {
        match self {
            EditorCommand::ReplaceTiles(cmd) => cmd.edits.is_empty(),
            EditorCommand::SelectTiles(cmd) => cmd.coords.is_empty(),
            EditorCommand::DeselectTiles(cmd) => cmd.coords.is_empty(),
            EditorCommand::MoveTileSelection(cmd) => cmd.from == cmd.to,
            EditorCommand::AddObjects(cmd) => cmd.instances.is_empty(),
            EditorCommand::RemoveObjects(cmd) => cmd.ids.is_empty(),
            EditorCommand::MoveObjects(cmd) => cmd.moves.is_empty(),
            EditorCommand::ReorderObjects(cmd) => cmd.ops.is_empty(),
            EditorCommand::Compound(cmd) => cmd.commands.is_empty(),
            EditorCommand::FloatTileSelection(_)
            | EditorCommand::DefloatTileSelection(_)
            | EditorCommand::DeleteTileSelection(_)
            | EditorCommand::CreateFloatingSelection(_) => false,
        }
    }

    pub fn apply(&mut self, level: &mut Level) {
        match self {
            EditorCommand::ReplaceTiles(cmd) => level.grid.redo_edits(&cmd.edits),
            EditorCommand::SelectTiles(cmd) => {
                let grid = &level.grid;
                let selection = &mut level.tile_selection;
                let stacks = cmd
                    .coords
                    .iter()
                    .map(|c| (*c, grid.tile_at(*c).cloned().unwrap_or_default()));
                cmd.added = selection.add_tiles(stacks);
                cmd.activated = !selection.is_active();
                selection.activate();
            }
            EditorCommand::DeselectTiles(cmd) => {
                cmd.removed = level.tile_selection.remove_tiles(cmd.coords.iter().copied());
            }
            EditorCommand::FloatTileSelection(cmd) => {
                let selection = &mut level.tile_selection;
                cmd.prior_mode = selection.mode();
                cmd.lifted.clear();
                cmd.replaced.clear();
                for coord in selection.coords() {
                    let current = level.grid.tile_at(coord).cloned().unwrap_or_default();
                    if let Some(previous) = selection.replace_stack(coord, current) {
                        cmd.replaced.push((coord, previous));
                    }
                    if let Some(edit) = level.grid.clear(coord) {
                        cmd.lifted.push(edit);
                    }
                }
                selection.set_mode(SelectionMode::Floating);
            }
            EditorCommand::DefloatTileSelection(cmd) => {
                cmd.overwritten.clear();
                for (coord, stack) in level.tile_selection.tiles() {
                    if stack.is_empty() {
                        continue;
                    }
                    if let Some(edit) = level.grid.set_stack(coord, Some(stack)) {
                        cmd.overwritten.push(edit);
                    }
                }
                level.tile_selection.set_mode(SelectionMode::Selected);
            }
            EditorCommand::MoveTileSelection(cmd) => level.tile_selection.set_origin(cmd.to),
            EditorCommand::DeleteTileSelection(cmd) => {
                let selection = &mut level.tile_selection;
                cmd.snapshot = Some(selection.clear());
                if selection.is_floating() {
                    selection.set_mode(SelectionMode::Selected);
                }
            }
            EditorCommand::CreateFloatingSelection(cmd) => {
                cmd.previous = Some(level.tile_selection.snapshot());
                level.tile_selection = TileSelection::floating(cmd.tiles.iter().cloned());
            }
            EditorCommand::AddObjects(cmd) => {
                for instance in &cmd.instances {
                    level.objects.push(instance.clone());
                }
            }
            EditorCommand::RemoveObjects(cmd) => {
                cmd.removed = cmd
                    .ids
                    .iter()
                    .filter_map(|id| level.objects.remove(*id))
                    .collect();
            }
            EditorCommand::MoveObjects(cmd) => {
                for m in &cmd.moves {
                    level.objects.set_position(m.id, m.to);
                }
            }
            EditorCommand::ReorderObjects(cmd) => {
                cmd.previous = level.objects.order();
                for (id, op) in &cmd.ops {
                    level.objects.reorder(*id, *op);
                }
            }
            EditorCommand::Compound(cmd) => {
                for sub_cmd in &mut cmd.commands {
                    sub_cmd.apply(level);
                }
            }
        }
    }

    pub fn undo(&mut self, level: &mut Level) {
        match self {
            EditorCommand::ReplaceTiles(cmd) => level.grid.revert_edits(&cmd.edits),
            EditorCommand::SelectTiles(cmd) => {
                let selection = &mut level.tile_selection;
                selection.remove_tiles(cmd.added.drain(..));
                if cmd.activated {
                    selection.set_mode(SelectionMode::Inactive);
                }
            }
            EditorCommand::DeselectTiles(cmd) => {
                level.tile_selection.add_tiles(cmd.removed.drain(..));
            }
            EditorCommand::FloatTileSelection(cmd) => {
                level.grid.revert_edits(&cmd.lifted);
                for (coord, stack) in cmd.replaced.drain(..) {
                    level.tile_selection.replace_stack(coord, stack);
                }
                level.tile_selection.set_mode(cmd.prior_mode);
            }
            EditorCommand::DefloatTileSelection(cmd) => {
                level.grid.revert_edits(&cmd.overwritten);
                level.tile_selection.set_mode(SelectionMode::Floating);
            }
            EditorCommand::MoveTileSelection(cmd) => level.tile_selection.set_origin(cmd.from),
            EditorCommand::DeleteTileSelection(cmd) => {
                if let Some(snapshot) = cmd.snapshot.take() {
                    level.tile_selection.restore(snapshot);
                }
            }
            EditorCommand::CreateFloatingSelection(cmd) => {
                if let Some(previous) = cmd.previous.take() {
                    level.tile_selection.restore(previous);
                }
            }
            EditorCommand::AddObjects(cmd) => {
                for instance in cmd.instances.iter().rev() {
                    level.objects.remove(instance.id);
                }
            }
            EditorCommand::RemoveObjects(cmd) => {
                for (index, instance) in cmd.removed.drain(..).rev() {
                    level.objects.insert(index, instance);
                }
            }
            EditorCommand::MoveObjects(cmd) => {
                for m in &cmd.moves {
                    level.objects.set_position(m.id, m.from);
                }
            }
            EditorCommand::ReorderObjects(cmd) => level.objects.restore_order(&cmd.previous),
            EditorCommand::Compound(cmd) => {
                for sub_cmd in cmd.commands.iter_mut().rev() {
                    sub_cmd.undo(level);
                }
            }
        }
    }
}
