//! Block inspection panel.
//!
//! A creative-mode player holding a full stack of the inspection tool gets a
//! panel describing whatever block they are looking at: the item it picks
//! as, its material, which footstep acoustics it maps to, and which effects
//! and sounds it can trigger. The panel is refreshed every fifth tick.

use crate::color::{strip_formatting, TextColor};
use anyhow::Result;
use mdsurround_core::RegistryKey;
use mdsurround_environ::{EffectHandler, TickContext};
use mdsurround_world::BlockPos;
use serde::{Deserialize, Serialize};

/// Item that turns the panel on.
pub const INSPECTION_TOOL: &str = "minecraft:nether_star";
/// Stack size the tool must have.
pub const INSPECTION_TOOL_COUNT: u32 = 64;

const REFRESH_INTERVAL: u64 = 5;

/// Everything the host can tell about the targeted block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlockDescription {
    pub pos: BlockPos,
    pub is_air: bool,
    /// Display name of the item the block picks as.
    pub display_name: Option<String>,
    /// Registry name of that item, with subtype when it has one.
    pub item_name: Option<String>,
    pub block_name: String,
    pub material: String,
    pub footstep_acoustics: Vec<String>,
    pub block_effects: Vec<String>,
    pub always_on_effects: Vec<String>,
    pub step_sounds: Vec<String>,
    pub step_sound_chance: u32,
    pub block_sounds: Vec<String>,
    pub block_sound_chance: u32,
    pub dictionary_names: Vec<String>,
}

/// Host capability: describe the block under the crosshair.
pub trait BlockInspector {
    /// `None` when nothing is targeted.
    fn targeted_block(&self) -> Option<BlockDescription>;
}

/// Lines of text shown together, with no layout of their own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextPanel {
    lines: Vec<String>,
}

impl TextPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_text(&mut self, lines: Vec<String>) {
        self.lines = lines;
    }

    pub fn reset_text(&mut self) {
        self.lines.clear();
    }

    pub fn has_text(&self) -> bool {
        !self.lines.is_empty()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Widest line in visible characters.
    pub fn width(&self) -> usize {
        self.lines
            .iter()
            .map(|line| strip_formatting(line).chars().count())
            .max()
            .unwrap_or(0)
    }
}

fn section(text: &mut Vec<String>, header: &str, entries: &[String]) {
    if entries.is_empty() {
        return;
    }
    text.push(format!("{}<{}>", TextColor::DarkPurple, header));
    text.extend(entries.iter().map(|e| format!("{}{}", TextColor::Gold, e)));
}

fn sound_section(text: &mut Vec<String>, header: &str, chance: u32, sounds: &[String]) {
    if sounds.is_empty() {
        return;
    }
    text.push(format!("{}<{}>", TextColor::DarkPurple, header));
    text.push(format!("{}Chance: 1 in {}", TextColor::DarkGreen, chance));
    text.extend(sounds.iter().map(|s| format!("{}{}", TextColor::Gold, s)));
}

impl BlockDescription {
    /// Panel lines, sections omitted when empty.
    pub fn lines(&self) -> Vec<String> {
        let mut text = Vec::new();
        if let Some(display) = &self.display_name {
            text.push(format!("{}{}", TextColor::Red, display));
        }
        if let Some(item) = &self.item_name {
            text.push(format!("ITEM: {item}"));
        }
        text.push(format!("BLOCK: {}", self.block_name));
        text.push(format!("Material: {}", self.material));
        section(&mut text, "Footstep Accoustics", &self.footstep_acoustics);
        section(&mut text, "Block Effects", &self.block_effects);
        section(&mut text, "Always On Effects", &self.always_on_effects);
        sound_section(
            &mut text,
            "Step Sounds",
            self.step_sound_chance,
            &self.step_sounds,
        );
        sound_section(
            &mut text,
            "Block Sounds",
            self.block_sound_chance,
            &self.block_sounds,
        );
        section(&mut text, "Dictionary Names", &self.dictionary_names);
        text
    }
}

/// Refreshes a [`TextPanel`] from a [`BlockInspector`].
pub struct BlockInfoHelper {
    inspector: Box<dyn BlockInspector>,
    panel: TextPanel,
    tool: Option<RegistryKey>,
}

impl BlockInfoHelper {
    pub fn new(inspector: Box<dyn BlockInspector>) -> Self {
        Self {
            inspector,
            panel: TextPanel::new(),
            tool: RegistryKey::parse(INSPECTION_TOOL).ok(),
        }
    }

    pub fn panel(&self) -> &TextPanel {
        &self.panel
    }

    fn is_holding_tool(&self, held: Option<(RegistryKey, u32)>) -> bool {
        match (held, &self.tool) {
            (Some((item, count)), Some(tool)) => &item == tool && count == INSPECTION_TOOL_COUNT,
            _ => false,
        }
    }

    /// Rebuild the panel on refresh ticks; between refreshes it keeps its text.
    pub fn refresh(&mut self, tick: u64, creative: bool, held: Option<(RegistryKey, u32)>) {
        if tick == 0 || tick % REFRESH_INTERVAL != 0 {
            return;
        }
        self.panel.reset_text();
        if !creative || !self.is_holding_tool(held) {
            return;
        }
        if let Some(block) = self.inspector.targeted_block() {
            if !block.is_air {
                self.panel.set_text(block.lines());
            }
        }
    }
}

impl<S> EffectHandler<S> for BlockInfoHelper {
    fn name(&self) -> &str {
        "block-info"
    }

    fn process(&mut self, ctx: &TickContext<'_>, _services: &mut S) -> Result<()> {
        let creative = ctx.status().is_creative();
        self.refresh(
            ctx.snapshot.tick_counter(),
            creative,
            ctx.player.held_item(),
        );
        Ok(())
    }

    fn on_disconnect(&mut self) {
        self.panel.reset_text();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Option<BlockDescription>);

    impl BlockInspector for Fixed {
        fn targeted_block(&self) -> Option<BlockDescription> {
            self.0.clone()
        }
    }

    fn grass() -> BlockDescription {
        BlockDescription {
            pos: BlockPos::new(0, 63, 0),
            display_name: Some("Grass Block".into()),
            item_name: Some("minecraft:grass".into()),
            block_name: "minecraft:grass[snowy=false]".into(),
            material: "GRASS".into(),
            footstep_acoustics: vec!["grass".into()],
            step_sounds: vec!["dsurround:crunch".into()],
            step_sound_chance: 40,
            ..BlockDescription::default()
        }
    }

    fn tool() -> Option<(RegistryKey, u32)> {
        Some((RegistryKey::parse(INSPECTION_TOOL).unwrap(), INSPECTION_TOOL_COUNT))
    }

    #[test]
    fn description_lines_skip_empty_sections() {
        let plain: Vec<String> = grass().lines().iter().map(|l| strip_formatting(l)).collect();
        assert_eq!(
            plain,
            vec![
                "Grass Block",
                "ITEM: minecraft:grass",
                "BLOCK: minecraft:grass[snowy=false]",
                "Material: GRASS",
                "<Footstep Accoustics>",
                "grass",
                "<Step Sounds>",
                "Chance: 1 in 40",
                "dsurround:crunch",
            ]
        );
    }

    #[test]
    fn refreshes_only_every_fifth_nonzero_tick() {
        let mut helper = BlockInfoHelper::new(Box::new(Fixed(Some(grass()))));
        helper.refresh(0, true, tool());
        assert!(!helper.panel().has_text());
        helper.refresh(3, true, tool());
        assert!(!helper.panel().has_text());
        helper.refresh(5, true, tool());
        assert!(helper.panel().has_text());
        helper.refresh(6, false, None);
        assert!(helper.panel().has_text());
        helper.refresh(10, false, tool());
        assert!(!helper.panel().has_text());
    }

    #[test]
    fn requires_full_stack_of_tool() {
        let mut helper = BlockInfoHelper::new(Box::new(Fixed(Some(grass()))));
        let partial = Some((RegistryKey::parse(INSPECTION_TOOL).unwrap(), 63));
        helper.refresh(5, true, partial);
        assert!(!helper.panel().has_text());
    }

    #[test]
    fn air_clears_panel() {
        let air = BlockDescription {
            is_air: true,
            ..grass()
        };
        let mut helper = BlockInfoHelper::new(Box::new(Fixed(Some(air))));
        helper.refresh(5, true, tool());
        assert!(!helper.panel().has_text());
        assert_eq!(helper.panel().width(), 0);
    }
}
