use std::io;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, Settings};
use crate::domain::{
    sample_tree, BuildState, CountLeavesVisitor, DecisionTree, DepthVisitor, Node,
};
use crate::tree_traits::{node_text, TreeNodeConvert};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let settings = Settings::load(cli.config_file.as_deref())?;
    debug!(?settings, "Effective settings");

    match &cli.command {
        Some(Commands::Demo) => _demo(&settings),
        Some(Commands::Walk { from }) => _walk(&settings, from.as_deref()),
        Some(Commands::Measure) => _measure(),
        Some(Commands::Tree) => _tree(&settings),
        Some(Commands::Build {
            initial_state,
            split_advances,
            steps,
        }) => _build(&settings, *initial_state, *split_advances, *steps),
        Some(Commands::Config { command }) => _config(&settings, command),
        Some(Commands::Completion { shell }) => _completion(*shell),
        None => Ok(()),
    }
}

#[instrument(skip(settings))]
fn _demo(settings: &Settings) -> CliResult<()> {
    output::header("Pre-order walk");
    _walk(settings, None)?;

    output::header("Visitors");
    _measure()?;

    output::header("Tree builder");
    _build(settings, None, false, 8)
}

#[instrument(skip(settings))]
fn _walk(settings: &Settings, from: Option<&str>) -> CliResult<()> {
    let tree = sample_tree()?;
    let iter = match from {
        Some(name) => {
            let start = tree
                .find(name)
                .ok_or_else(|| CliError::InvalidArgs(format!("no node named '{name}'")))?;
            tree.iter_from(start)
        }
        None => tree.iter(),
    };
    for (_, node) in iter {
        output::info(&node_text(node, settings.display.show_labels));
    }
    Ok(())
}

#[instrument]
fn _measure() -> CliResult<()> {
    let tree = sample_tree()?;

    let mut depth = DepthVisitor::new();
    tree.accept(&mut depth);
    let mut leaves = CountLeavesVisitor::new();
    tree.accept(&mut leaves);

    output::action("max depth", &depth.max_depth());
    output::action("leaves", &leaves.count());
    Ok(())
}

#[instrument(skip(settings))]
fn _tree(settings: &Settings) -> CliResult<()> {
    let tree = sample_tree()?;
    output::info(&tree.to_tree_string(settings.display.show_labels));
    Ok(())
}

#[instrument(skip(settings))]
fn _build(
    settings: &Settings,
    initial_state: Option<BuildState>,
    split_advances: bool,
    steps: usize,
) -> CliResult<()> {
    if steps == 0 {
        return Err(CliError::InvalidArgs("steps must be at least 1".into()));
    }
    let mut builder_settings = settings.builder.clone();
    if let Some(state) = initial_state {
        builder_settings.initial_state = state;
    }
    builder_settings.split_advances |= split_advances;
    let mut builder = builder_settings.to_builder();

    let tree: DecisionTree = sample_tree()?;
    let nodes: Vec<&Node> = tree.iter().map(|(_, node)| node).collect();

    for node in nodes.iter().cycle().take(steps) {
        if builder.is_terminated() {
            break;
        }
        let before = builder.state();
        builder.build(node)?;
        output::action(
            &state_name(before),
            &format!("{} -> {}", node.name(), state_name(builder.state())),
        );
    }

    if builder.is_terminated() {
        output::success(&format!("build terminated after {} steps", builder.steps()));
    } else {
        output::detail(&format!(
            "still {} after {} steps",
            state_name(builder.state()),
            builder.steps()
        ));
    }
    Ok(())
}

fn state_name(state: Option<BuildState>) -> String {
    state
        .map(|s| s.to_string())
        .unwrap_or_else(|| "terminated".to_string())
}

#[instrument(skip(settings))]
fn _config(settings: &Settings, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => output::info(&settings.to_toml()?),
        ConfigCommands::Template => output::info(&Settings::template()),
        ConfigCommands::Path => match global_config_path() {
            Some(path) => output::info(&path.display()),
            None => output::info("no config directory available"),
        },
    }
    Ok(())
}

#[instrument]
fn _completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "dectree", &mut io::stdout());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn given_zero_steps_when_building_then_invalid_args() {
        let result = _build(&Settings::default(), None, false, 0);
        assert!(matches!(result, Err(CliError::InvalidArgs(_))));
    }

    #[test]
    fn given_unknown_start_node_when_walking_then_invalid_args() {
        let result = _walk(&Settings::default(), Some("nowhere"));
        assert!(matches!(result, Err(CliError::InvalidArgs(_))));
    }

    #[test]
    fn given_build_args_when_parsing_then_state_is_typed() {
        let cli = Cli::parse_from(["dectree", "build", "--initial-state", "stopping", "-s", "3"]);
        match cli.command {
            Some(Commands::Build {
                initial_state,
                steps,
                split_advances,
            }) => {
                assert_eq!(initial_state, Some(BuildState::Stopping));
                assert_eq!(steps, 3);
                assert!(!split_advances);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn given_stopping_start_when_building_then_terminates() {
        let result = _build(&Settings::default(), Some(BuildState::Stopping), false, 8);
        assert!(result.is_ok());
    }
}
