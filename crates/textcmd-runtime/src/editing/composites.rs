#![forbid(unsafe_code)]

//! Multi-step paragraph edits built from factory-supplied primitives.
//!
//! Every builder computes its sub-command arguments up front. Positions are
//! symbolic, so a builder only needs a concrete line index where it does
//! line arithmetic; passing `LinePosition::End` there is an
//! [`CommandError::InvalidArgument`].

use textcmd_text::{CharacterPosition, LinePosition, SingleLineTextRange, TextPosition};

use super::{DoTypes, TextEditingCommand, TextEditingCommandFactory};
use crate::composite::CompositeCommand;
use crate::error::{CommandError, CommandResult};

fn concrete_line(line: LinePosition, operation: &str) -> CommandResult<usize> {
    line.index().ok_or_else(|| {
        CommandError::InvalidArgument(format!("{operation} needs a concrete line, got {line}"))
    })
}

fn line_after(index: usize, offset: usize) -> CommandResult<LinePosition> {
    index
        .checked_add(offset)
        .map(LinePosition::at)
        .ok_or_else(|| CommandError::InvalidArgument("line index overflow".to_string()))
}

fn next_line(index: usize) -> CommandResult<LinePosition> {
    line_after(index, 1)
}

fn with_position<C>(
    mut command: Box<dyn TextEditingCommand<C>>,
    update: DoTypes,
) -> Box<dyn TextEditingCommand<C>> {
    command.set_update_text_position(update);
    command
}

/// Split the line at `position`: the text right of the position moves to
/// a new line inserted after it.
///
/// # Errors
///
/// [`CommandError::InvalidArgument`] if `position` is on `LinePosition::End`.
pub fn split_paragraph<C, F>(
    factory: &F,
    position: TextPosition,
) -> CommandResult<CompositeCommand<C>>
where
    C: 'static,
    F: TextEditingCommandFactory<C> + ?Sized,
{
    let line = concrete_line(position.line(), "split paragraph")?;
    let new_line = next_line(line)?;

    let mut composite = CompositeCommand::new("Split paragraph");
    composite.push(with_position(
        factory.create_insert_line_command(new_line),
        DoTypes::ALL,
    ));
    composite.push(factory.create_insert_text_from_text_range_command(
        TextPosition::new(new_line, CharacterPosition::BEGIN),
        SingleLineTextRange::new(position.line(), position.character(), CharacterPosition::End),
    ));
    composite.push(factory.create_delete_text_command(SingleLineTextRange::new(
        LinePosition::at(line),
        position.character(),
        CharacterPosition::End,
    )));
    Ok(composite)
}

/// Append `line` to the end of the previous line and delete it.
///
/// # Errors
///
/// - [`CommandError::PreconditionFailed`] for the first line.
/// - [`CommandError::InvalidArgument`] for `LinePosition::End`.
pub fn join_previous_paragraph<C, F>(
    factory: &F,
    line: LinePosition,
) -> CommandResult<CompositeCommand<C>>
where
    C: 'static,
    F: TextEditingCommandFactory<C> + ?Sized,
{
    let index = concrete_line(line, "join previous paragraph")?;
    let Some(previous) = index.checked_sub(1) else {
        return Err(CommandError::PreconditionFailed(
            "cannot join the paragraph on the first line".to_string(),
        ));
    };

    let mut composite = CompositeCommand::new("Join previous paragraph");
    composite.push(with_position(
        factory.create_insert_text_from_text_range_command(
            TextPosition::new(LinePosition::at(previous), CharacterPosition::End),
            SingleLineTextRange::whole_line(line),
        ),
        DoTypes::ALL,
    ));
    composite.push(with_position(
        factory.create_delete_line_command(line),
        DoTypes::NONE,
    ));
    Ok(composite)
}

/// Append the line after `line` to it, separated by a space, and delete
/// the following line.
///
/// # Errors
///
/// [`CommandError::InvalidArgument`] for `LinePosition::End`.
pub fn join_next_paragraph<C, F>(
    factory: &F,
    line: LinePosition,
) -> CommandResult<CompositeCommand<C>>
where
    C: 'static,
    F: TextEditingCommandFactory<C> + ?Sized,
{
    let following = next_line(concrete_line(line, "join next paragraph")?)?;
    let end_of_line = TextPosition::new(line, CharacterPosition::End);

    let mut composite = CompositeCommand::new("Join next paragraph");
    composite.push(with_position(
        factory.create_insert_text_command(end_of_line, " "),
        DoTypes::ALL,
    ));
    composite.push(factory.create_insert_text_from_text_range_command(
        end_of_line,
        SingleLineTextRange::whole_line(following),
    ));
    composite.push(factory.create_delete_line_command(following));
    Ok(composite)
}

/// Insert `text` at `position`. Text containing `'\n'` splits the line at
/// `position` and spreads the pasted lines across new lines.
///
/// # Errors
///
/// [`CommandError::InvalidArgument`] if multi-line text is pasted on
/// `LinePosition::End`.
pub fn paste<C, F>(
    factory: &F,
    position: TextPosition,
    text: &str,
) -> CommandResult<CompositeCommand<C>>
where
    C: 'static,
    F: TextEditingCommandFactory<C> + ?Sized,
{
    let mut composite = CompositeCommand::new("Paste");
    let lines: Vec<&str> = text.split('\n').collect();
    let [first, rest @ ..] = lines.as_slice() else {
        return Ok(composite);
    };

    if rest.is_empty() {
        composite.push(with_position(
            factory.create_insert_text_command(position, text),
            DoTypes::ALL,
        ));
        return Ok(composite);
    }

    let line = concrete_line(position.line(), "multi-line paste")?;
    let new_line = next_line(line)?;
    let targets = (1..=rest.len())
        .map(|offset| line_after(line, offset))
        .collect::<CommandResult<Vec<_>>>()?;

    composite.push(split_paragraph(factory, position)?);
    composite.push(with_position(
        factory.create_insert_text_command(position, first),
        DoTypes::ALL,
    ));
    for _ in 1..rest.len() {
        composite.push(factory.create_insert_line_command(new_line));
    }
    for (target, pasted) in targets.into_iter().zip(rest) {
        composite.push(with_position(
            factory.create_insert_text_command(
                TextPosition::new(target, CharacterPosition::BEGIN),
                pasted,
            ),
            DoTypes::EXECUTE_AND_REDO,
        ));
    }
    Ok(composite)
}
