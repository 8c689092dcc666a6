//! Notifications: a recipient list set up in `__init__` and an optional
//! trigger method.

use std::path::Path;

use botforge_core::{PyLiteral, expand_tabs, indent};
use botforge_fragments::{FragmentStore, Slots, ids};
use botforge_request::{
    FeatureId, GenerationRequest, NotificationSettings, Recipients, UsersSource,
};
use indexmap::IndexMap;

use super::{Contribution, FeatureComposer};
use crate::{Diagnostic, GenerateError, Result, Signature};

/// Indentation of statements inside a generated method.
const METHOD_BODY: usize = 8;

#[derive(Debug, Clone, Copy, Default)]
pub struct NotificationsComposer;

impl FeatureComposer for NotificationsComposer {
    fn feature(&self) -> FeatureId {
        FeatureId::Notifications
    }

    fn compose(
        &self,
        request: &GenerationRequest,
        store: &dyn FragmentStore,
    ) -> Result<Contribution> {
        let defaults = NotificationSettings::default();
        let settings = request.notifications.as_ref().unwrap_or(&defaults);
        let mut contribution = Contribution::default();

        if let Some(accesses) = &settings.accesses {
            let literal = PyLiteral::str_list(accesses.iter().cloned());
            contribution
                .init
                .push_str(&indent(&format!("self.accesses = {literal}"), METHOD_BODY));
        }

        match &settings.users {
            UsersSource::Inline(recipients) => {
                push_users(&mut contribution.init, recipients);
            }
            UsersSource::File(path) => {
                let recipients = read_users_file(path, settings.accesses.is_some())?;
                tracing::debug!(path = %path.display(), count = recipients.len(), "users file read");
                push_users(&mut contribution.init, &recipients);
            }
            UsersSource::Code(code) => {
                let own_code = indent(code, METHOD_BODY);
                let rendered = store
                    .get(ids::USER_LIST_FUNC)?
                    .render(&Slots::new().with("own_code", &own_code))?;
                contribution.init.push_str(&rendered);
            }
        }

        match &settings.notif_func {
            Some(code) => {
                let signature = Signature::build(&["self"], &settings.notif_func_args).to_string();
                let own_code = indent(&expand_tabs(code), METHOD_BODY);
                contribution.body = store.get(ids::TRIGGER)?.render(
                    &Slots::new()
                        .with("notif_args", &signature)
                        .with("own_code", &own_code),
                )?;
            }
            None => contribution.diagnostics.push(
                Diagnostic::info(
                    "notifications",
                    "no notif_func given; the bot has no trigger method",
                )
                .at("notifications.notif_func"),
            ),
        }

        tracing::debug!(
            users_type = settings.users.users_type(),
            trigger = settings.notif_func.is_some(),
            "notifications composed"
        );
        Ok(contribution)
    }
}

fn push_users(init: &mut String, recipients: &Recipients) {
    init.push_str(&indent(
        &format!("self.users = {}", recipients.to_literal()),
        METHOD_BODY,
    ));
}

/// Read recipients from a file with one entry per line.
///
/// Without accesses each non-blank line is a user id. With accesses a line
/// is `user_id,label,label...`; empty labels are dropped.
fn read_users_file(path: &Path, with_accesses: bool) -> Result<Recipients> {
    let content = std::fs::read_to_string(path).map_err(|source| GenerateError::UsersFile {
        path: path.to_path_buf(),
        source,
    })?;

    let entries = content.lines().map(str::trim).filter(|line| !line.is_empty());

    if !with_accesses {
        return Ok(Recipients::List(
            entries.map(|id| PyLiteral::Str(id.to_string())).collect(),
        ));
    }

    let mut users = IndexMap::new();
    for entry in entries {
        let mut parts = entry.split(',').map(str::trim);
        let id = parts.next().unwrap_or_default().to_string();
        let labels = parts
            .filter(|label| !label.is_empty())
            .map(str::to_string)
            .collect();
        users.insert(id, labels);
    }
    Ok(Recipients::Map(users))
}
