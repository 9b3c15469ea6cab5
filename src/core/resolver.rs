// src/core/resolver.rs

use crate::models::{EntityKind, NamedEntity, StackSnapshot};

/// Outcome of resolving user tokens to a single instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Exactly one instance was selected.
    Resolved(NamedEntity),
    /// No instance name matched any token, or the disambiguating stack
    /// holds none of the matching instances.
    NotFound,
    /// Several instances matched and no token named a stack. Carries every
    /// candidate so the caller can show them.
    Ambiguous(Vec<NamedEntity>),
}

/// Flattens every entity of every snapshot whose name equals `name`, in
/// snapshot order and, within a snapshot, stack then apps then instances.
pub fn find_by_name(name: &str, snapshots: &[StackSnapshot]) -> Vec<NamedEntity> {
    let mut matches = Vec::new();

    for snapshot in snapshots {
        let stack = &snapshot.stack;
        let row = |id: &str, display_name: &str, kind| NamedEntity {
            id: id.to_string(),
            display_name: display_name.to_string(),
            stack_id: stack.id.clone(),
            stack_name: stack.name.clone(),
            kind,
        };

        if stack.name == name {
            matches.push(row(&stack.id, &stack.name, EntityKind::Stack));
        }
        matches.extend(
            snapshot
                .apps
                .iter()
                .filter(|app| app.short_name == name)
                .map(|app| row(&app.id, &app.short_name, EntityKind::App)),
        );
        matches.extend(
            snapshot
                .instances
                .iter()
                .filter(|instance| instance.hostname == name)
                .map(|instance| row(&instance.id, &instance.hostname, EntityKind::Instance)),
        );
    }

    matches
}

/// Returns every entity of `kind` whose name exactly equals one of `tokens`.
///
/// Ordering is token order first, then snapshot order. A token that names
/// the same entity twice yields it twice.
pub fn find_by_kind_and_tokens<S: AsRef<str>>(
    tokens: &[S],
    kind: EntityKind,
    snapshots: &[StackSnapshot],
) -> Vec<NamedEntity> {
    tokens
        .iter()
        .flat_map(|token| find_by_name(token.as_ref(), snapshots))
        .filter(|entity| entity.kind == kind)
        .collect()
}

/// Picks the single instance the tokens refer to.
///
/// A unique instance name resolves directly. When the name exists in several
/// stacks, the first token that names a stack scopes the choice; among the
/// matching instances of that stack the last one wins.
pub fn resolve_single_instance<S: AsRef<str>>(
    tokens: &[S],
    snapshots: &[StackSnapshot],
) -> Resolution {
    let mut candidates = find_by_kind_and_tokens(tokens, EntityKind::Instance, snapshots);

    match candidates.len() {
        0 => return Resolution::NotFound,
        1 => return candidates.pop().map_or(Resolution::NotFound, Resolution::Resolved),
        _ => {}
    }

    let stacks = find_by_kind_and_tokens(tokens, EntityKind::Stack, snapshots);
    let Some(scope) = stacks.first() else {
        log::debug!(
            "{} instances match and no stack token was given.",
            candidates.len()
        );
        return Resolution::Ambiguous(candidates);
    };

    log::debug!("Scoping instance lookup to stack '{}'.", scope.display_name);
    candidates
        .into_iter()
        .filter(|instance| instance.stack_id == scope.stack_id)
        .last()
        .map_or(Resolution::NotFound, Resolution::Resolved)
}

/// The first app named by any token, if one exists.
pub fn find_first_app<S: AsRef<str>>(
    tokens: &[S],
    snapshots: &[StackSnapshot],
) -> Option<NamedEntity> {
    find_by_kind_and_tokens(tokens, EntityKind::App, snapshots)
        .into_iter()
        .next()
}
