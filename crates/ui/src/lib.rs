use bevy::prelude::*;
use bevy_egui::EguiPlugin;

pub mod alerts_panel;
pub mod analytics_panel;
pub mod header;
pub mod metrics_panel;
pub mod theme;
pub mod zone_map;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(EguiPlugin)
            .add_systems(Startup, theme::apply_ops_theme)
            .add_systems(
                Update,
                // Panel order matters: the central map must be laid out
                // after the top/side/bottom panels have claimed their space.
                (
                    header::header_ui,
                    metrics_panel::metrics_ui,
                    alerts_panel::alerts_ui,
                    analytics_panel::analytics_ui,
                    zone_map::zone_map_ui,
                )
                    .chain(),
            );
    }
}
