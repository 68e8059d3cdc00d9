//! InteractionPlugin turns pointer clicks and key presses into store actions.
use bevy::prelude::*;

use crate::core::FrameStep;

use super::{
    events::SelectSection,
    systems::{digit_shortcuts, handle_select_section, pick_on_click},
};

pub struct InteractionPlugin;

impl Plugin for InteractionPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<SelectSection>().add_systems(
            Update,
            (pick_on_click, digit_shortcuts, handle_select_section)
                .chain()
                .in_set(FrameStep::Input),
        );

        info!("InteractionPlugin registered");
    }
}
