//! Layer composition shared by the configuration tests.

use ortho_config::MergeComposer;
use serde_json::Value;

use crate::PullwrightConfig;

/// Source a configuration layer stands in for.
#[derive(Debug, Clone, Copy)]
pub enum Layer {
    Defaults,
    File,
    Environment,
    Cli,
}

/// Merges `layers` in order, as `PullwrightConfig::load` would.
pub fn compose(layers: &[(Layer, Value)]) -> PullwrightConfig {
    let mut composer = MergeComposer::new();

    for (layer, value) in layers.iter().cloned() {
        match layer {
            Layer::Defaults => composer.push_defaults(value),
            Layer::File => composer.push_file(value, None),
            Layer::Environment => composer.push_environment(value),
            Layer::Cli => composer.push_cli(value),
        }
    }

    PullwrightConfig::merge_from_layers(composer.layers()).expect("merge should succeed")
}
