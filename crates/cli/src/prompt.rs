use inquire::{Select, Text};

use gogo::errors::*;

use crate::args::*;

pub fn prompt_for_args(args: ResolveArgs) -> Result<RuntimeArgs> {
    let name_default = args.name.unwrap_or_default();

    let name = Text::new("anime name:")
        .with_help_message("free text, e.g. one piece")
        .with_initial_value(&name_default)
        .prompt()
        .map_err(|err| GogoError::Message(format!("failed to read anime name: {err}")))?;

    Ok(RuntimeArgs::new(
        name,
        args.anime,
        args.episode,
        args.base_url,
    ))
}

/// menu selection over a fetched list; the cursor is bounded to the list, so
/// no out-of-range input is possible here.
pub fn prompt_select<'a, T, F>(message: &str, items: &'a [T], label: F) -> Result<&'a T>
where
    F: Fn(&T) -> String,
{
    let options: Vec<String> = items
        .iter()
        .enumerate()
        .map(|(i, item)| format!("{}. {}", i + 1, label(item)))
        .collect();

    let choice = Select::new(message, options)
        .with_starting_cursor(0)
        .raw_prompt()
        .map_err(|err| GogoError::Message(format!("failed to read selection: {err}")))?;

    Ok(&items[choice.index])
}
