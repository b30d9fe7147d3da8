/// Session-to-engineer resolution. The identity provider itself is external;
/// only the `{email, name, domain}` triple it supplies is modeled here.
use crate::color::color_for_email;
use crate::types::Engineer;

#[derive(Clone, Debug)]
pub struct Session {
    pub email: String,
    pub name: String,
    pub domain: String,
}

impl Session {
    pub fn new(email: &str, name: &str) -> Self {
        Session {
            email: email.to_string(),
            name: name.to_string(),
            domain: email_domain(email).to_string(),
        }
    }
}

pub fn email_domain(email: &str) -> &str {
    email.split_once('@').map(|(_, domain)| domain).unwrap_or("")
}

/// Find the engineer record for a session: exact email among engineers on
/// the session's domain first, then exact email anywhere.
pub fn resolve_engineer<'a>(session: &Session, engineers: &'a [Engineer]) -> Option<&'a Engineer> {
    engineers
        .iter()
        .find(|engineer| {
            email_domain(&engineer.email) == session.domain && engineer.email == session.email
        })
        .or_else(|| engineers.iter().find(|engineer| engineer.email == session.email))
}

/// Materialize a synthetic engineer for a session with no matching record.
/// The color is a deterministic function of the email so the same user keeps
/// the same color across sessions.
pub fn materialize_engineer(session: &Session) -> Engineer {
    Engineer {
        id: format!("eng-{}", session.email.replace(['@', '.'], "-")),
        name: session.name.clone(),
        email: session.email.clone(),
        role: "Field Engineer".to_string(),
        daily_rate: 0.0,
        color: color_for_email(&session.email),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::PALETTE;

    fn engineer(id: &str, email: &str) -> Engineer {
        Engineer {
            id: id.to_string(),
            name: id.to_string(),
            email: email.to_string(),
            role: "Engineer".to_string(),
            daily_rate: 800.0,
            color: "#3B82F6".to_string(),
        }
    }

    #[test]
    fn resolves_by_exact_email() {
        let engineers = vec![
            engineer("1", "marie.dubois@company.fr"),
            engineer("2", "jean.martin@company.fr"),
        ];
        let session = Session::new("jean.martin@company.fr", "Jean Martin");
        assert_eq!(resolve_engineer(&session, &engineers).unwrap().id, "2");
    }

    #[test]
    fn falls_back_to_exact_email_outside_the_domain() {
        let engineers = vec![engineer("1", "marie.dubois@partner.example")];
        let session = Session {
            email: "marie.dubois@partner.example".to_string(),
            name: "Marie Dubois".to_string(),
            domain: "company.fr".to_string(),
        };
        assert_eq!(resolve_engineer(&session, &engineers).unwrap().id, "1");
    }

    #[test]
    fn unmatched_session_resolves_to_none() {
        let engineers = vec![engineer("1", "marie.dubois@company.fr")];
        let session = Session::new("new.hire@company.fr", "New Hire");
        assert!(resolve_engineer(&session, &engineers).is_none());
    }

    #[test]
    fn materialized_engineer_has_deterministic_palette_color() {
        let session = Session::new("new.hire@company.fr", "New Hire");
        let first = materialize_engineer(&session);
        let second = materialize_engineer(&session);
        assert_eq!(first.color, second.color);
        assert!(PALETTE.contains(&first.color.as_str()));
        assert_eq!(first.name, "New Hire");
        assert_eq!(first.email, "new.hire@company.fr");
    }

    #[test]
    fn domain_extraction() {
        assert_eq!(email_domain("a@b.fr"), "b.fr");
        assert_eq!(email_domain("not-an-email"), "");
    }
}
