//! Flash notice catalog keyed like the translation files.

static MESSAGES: &[(&str, &str)] = &[
    ("flashes.user.notice.added", "User \"%username%\" added."),
    ("flashes.user.notice.updated", "User \"%username%\" updated."),
    ("flashes.user.notice.deleted", "User \"%username%\" deleted."),
];

/// Resolves a message key, substituting `%name%` placeholders. Unknown keys
/// fall back to the key itself.
pub fn translate(key: &str, args: &[(&str, &str)]) -> String {
    let template = MESSAGES
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, template)| *template)
        .unwrap_or(key);

    let mut message = template.to_string();
    for (name, value) in args {
        message = message.replace(&format!("%{name}%"), value);
    }
    message
}
