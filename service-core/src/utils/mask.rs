//! Credential masking for anything derived from a connection string.
//!
//! Connection URIs carry `user:password@` in their authority. Every log line
//! and every response body that may contain a URI or a driver error goes
//! through [`CredentialMask::apply`] first.

const MASK: &str = "****";

/// Shortest credential that is also scrubbed as a free-standing literal.
/// Shorter values would shred unrelated text and are only masked in URI form.
const MIN_LITERAL_LEN: usize = 3;

/// Splits the text following `://` into the URI token and the position of
/// the `@` that closes its userinfo.
///
/// The token runs to the first whitespace or quote. The last `@` inside it
/// ends the userinfo, so `/`, `?` or `#` inside a password do not cut it short.
fn userinfo_bounds(tail: &str) -> (usize, Option<usize>) {
    let end = tail
        .find(|c: char| matches!(c, '"' | '\'') || c.is_whitespace())
        .unwrap_or(tail.len());
    (end, tail[..end].rfind('@'))
}

/// Replaces the userinfo of every `scheme://userinfo@host` in `text`.
pub fn mask_credentials(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(idx) = rest.find("://") {
        let (head, tail) = rest.split_at(idx + 3);
        out.push_str(head);

        let (end, at) = userinfo_bounds(tail);
        let token = &tail[..end];

        match at {
            Some(at) => {
                out.push_str(MASK);
                out.push(':');
                out.push_str(MASK);
                out.push_str(&token[at..]);
            }
            None => out.push_str(token),
        }

        rest = &tail[end..];
    }

    out.push_str(rest);
    out
}

/// Masks URI userinfo plus the literal credentials of one known URI.
#[derive(Clone, Default)]
pub struct CredentialMask {
    secrets: Vec<String>,
}

impl CredentialMask {
    pub fn from_uri(uri: &str) -> Self {
        let mut secrets = Vec::new();

        if let Some(idx) = uri.find("://") {
            let tail = &uri[idx + 3..];
            if let (_, Some(at)) = userinfo_bounds(tail) {
                let userinfo = &tail[..at];
                let (user, password) = userinfo.split_once(':').unwrap_or((userinfo, ""));
                for secret in [userinfo, user, password] {
                    if secret.len() >= MIN_LITERAL_LEN && !secrets.iter().any(|s| s == secret) {
                        secrets.push(secret.to_string());
                    }
                }
            }
        }

        // Longest first so `user:pass` goes before `user`.
        secrets.sort_by_key(|s| std::cmp::Reverse(s.len()));
        Self { secrets }
    }

    pub fn apply(&self, text: &str) -> String {
        let mut masked = mask_credentials(text);
        for secret in &self.secrets {
            if masked.contains(secret.as_str()) {
                masked = masked.replace(secret.as_str(), MASK);
            }
        }
        masked
    }
}

impl std::fmt::Debug for CredentialMask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialMask")
            .field("secrets", &self.secrets.len())
            .finish()
    }
}
