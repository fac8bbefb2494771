//! Headless replay of editing scripts.
//!
//! A script registers object classes and brushes, then drives a
//! [`LevelController`] with a list of steps exactly as a host UI would:
//! tool switches, source changes, pointer events, ticks and menu commands.
//!
//! ```json
//! {
//!   "classes": [{ "name": "crate", "image": [0, 0, 16, 16] }],
//!   "steps": [
//!     { "tool": "tile_draw" },
//!     { "tile": 7 },
//!     { "pointer": { "phase": "click", "x": 40, "y": 56 } },
//!     { "command": "undo" }
//!   ]
//! }
//! ```

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tilekit_core::{Point, Rect, TileCoord};
use tilekit_editor::{
    CheckerBrush, CommandKey, LevelController, Modifiers, PointerButton, PointerEventInfo,
    SnapTarget, StaticBrush, TileId, ToolKind,
};

/// An object class to register before the steps run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassSpec {
    pub name: String,
    /// `[x, y, width, height]` in image space.
    pub image: [f64; 4],
    /// Defaults to the image bounds.
    #[serde(default)]
    pub mask: Option<[f64; 4]>,
    #[serde(default)]
    pub origin: [f64; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BrushSpec {
    Checker {
        name: String,
        even: u32,
        odd: u32,
        size: u32,
    },
    Static {
        name: String,
        /// `[dx, dy, tile]` triples relative to the anchor.
        cells: Vec<[i32; 3]>,
    },
}

impl BrushSpec {
    fn name(&self) -> &str {
        match self {
            BrushSpec::Checker { name, .. } | BrushSpec::Static { name, .. } => name,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerPhase {
    Start,
    Update,
    End,
    /// Start and end at the same position.
    Click,
    /// Movement with no sequence in progress.
    Move,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerStep {
    pub phase: PointerPhase,
    pub x: f64,
    pub y: f64,
    #[serde(default = "default_button")]
    pub button: PointerButton,
    #[serde(flatten)]
    pub modifiers: Modifiers,
}

fn default_button() -> PointerButton {
    PointerButton::Primary
}

impl PointerStep {
    fn event(&self) -> PointerEventInfo {
        let button = match self.phase {
            PointerPhase::Move => PointerButton::None,
            _ => self.button,
        };
        PointerEventInfo {
            modifiers: self.modifiers,
            ..PointerEventInfo::new(button, self.x, self.y)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Tool(ToolKind),
    Tile(Option<u32>),
    /// Activates a registered brush by name; `null` clears it.
    Brush(Option<String>),
    /// Activates a registered object class by name; `null` clears it.
    Class(Option<String>),
    Snap(SnapTarget),
    Pointer(PointerStep),
    Enter,
    Leave,
    /// Number of auto-scroll timer steps.
    Tick(u32),
    Command(CommandKey),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Script {
    pub classes: Vec<ClassSpec>,
    pub brushes: Vec<BrushSpec>,
    pub steps: Vec<Step>,
}

impl Script {
    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        serde_json::from_str(text).context("Failed to parse replay script")
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("In script {}", path.display()))
    }

    /// Registers the script's classes and brushes, then runs every step.
    pub fn run(&self, controller: &mut LevelController) -> anyhow::Result<Summary> {
        for class in &self.classes {
            let [x, y, w, h] = class.image;
            let image = Rect::new(x, y, w, h);
            let mask = class
                .mask
                .map(|[x, y, w, h]| Rect::new(x, y, w, h))
                .unwrap_or(image);
            let [ox, oy] = class.origin;
            controller.register_object_class(&class.name, image, mask, Point::new(ox, oy));
        }

        for brush in &self.brushes {
            if controller.brushes().find(brush.name()).is_some() {
                bail!("Brush '{}' is defined twice", brush.name());
            }
            match brush {
                BrushSpec::Checker {
                    name,
                    even,
                    odd,
                    size,
                } => controller.register_brush(Box::new(CheckerBrush::new(
                    name.as_str(),
                    TileId(*even),
                    TileId(*odd),
                    *size,
                ))),
                BrushSpec::Static { name, cells } => {
                    let cells = cells
                        .iter()
                        .map(|[dx, dy, id]| -> anyhow::Result<(TileCoord, TileId)> {
                            let id = u32::try_from(*id)
                                .with_context(|| format!("Brush '{}': bad tile {}", name, id))?;
                            Ok((TileCoord::new(*dx, *dy), TileId(id)))
                        })
                        .collect::<anyhow::Result<Vec<_>>>()?;
                    controller.register_brush(Box::new(StaticBrush::new(name.as_str(), cells)))
                }
            };
        }

        for (index, step) in self.steps.iter().enumerate() {
            apply_step(controller, step).with_context(|| format!("Step {} failed", index + 1))?;
        }

        Ok(Summary::of(controller))
    }
}

fn apply_step(controller: &mut LevelController, step: &Step) -> anyhow::Result<()> {
    tracing::trace!("Replay step: {:?}", step);
    match step {
        Step::Tool(kind) => controller.set_tool(*kind),
        Step::Tile(id) => controller.set_active_tile(id.map(TileId)),
        Step::Brush(name) => {
            let brush = match name {
                Some(name) => Some(
                    controller
                        .brushes()
                        .find(name)
                        .with_context(|| format!("Unknown brush '{}'", name))?,
                ),
                None => None,
            };
            controller.set_active_brush(brush);
        }
        Step::Class(name) => {
            let class = match name {
                Some(name) => Some(
                    controller
                        .level()
                        .objects
                        .pool()
                        .by_name(name)
                        .map(|class| class.id)
                        .with_context(|| format!("Unknown object class '{}'", name))?,
                ),
                None => None,
            };
            controller.set_active_object_class(class);
        }
        Step::Snap(target) => controller.set_snap_target(*target),
        Step::Pointer(pointer) => {
            let event = pointer.event();
            match pointer.phase {
                PointerPhase::Start => controller.start_pointer_sequence(event),
                PointerPhase::Update => controller.update_pointer_sequence(event),
                PointerPhase::End => controller.end_pointer_sequence(event),
                PointerPhase::Click => {
                    controller.start_pointer_sequence(event);
                    controller.end_pointer_sequence(event);
                }
                PointerPhase::Move => controller.pointer_position(event),
            }
        }
        Step::Enter => controller.pointer_enter(),
        Step::Leave => controller.pointer_leave(),
        Step::Tick(count) => {
            for _ in 0..*count {
                controller.tick();
            }
        }
        Step::Command(key) => {
            if !controller.execute(*key) {
                tracing::info!("Command {:?} not available", key);
            }
        }
    }
    Ok(())
}

/// Level state after a replay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub occupied_cells: usize,
    pub tiles: usize,
    pub objects: usize,
    pub selected_tiles: usize,
    pub undo_depth: usize,
    pub tool: ToolKind,
}

impl Summary {
    pub fn of(controller: &LevelController) -> Self {
        let level = controller.level();
        Self {
            occupied_cells: level.grid.len(),
            tiles: level.grid.occupied().map(|(_, stack)| stack.len()).sum(),
            objects: level.objects.len(),
            selected_tiles: level.tile_selection.len(),
            undo_depth: controller.history().undo_depth(),
            tool: controller.tool_kind(),
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} tiles in {} cells, {} objects, {} selected tiles, {} undo steps, tool {:?}",
            self.tiles,
            self.occupied_cells,
            self.objects,
            self.selected_tiles,
            self.undo_depth,
            self.tool
        )
    }
}
