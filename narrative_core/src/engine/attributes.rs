//! Attribute updates applied on each transition.

use story_rules::AttributeDelta;

use crate::session::Session;

/// Add a delta to the session's attributes. `None` is a no-op.
pub fn apply_delta(session: &mut Session, delta: Option<&AttributeDelta>) {
    let Some(delta) = delta else {
        return;
    };

    for (attribute, amount) in delta.entries() {
        let value = session.attributes.add(attribute, amount);
        tracing::debug!(
            session_id = %session.id,
            attribute = %attribute,
            delta = amount,
            value,
            "attribute updated"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::UserId;
    use story_rules::{Attribute, Attributes, SceneId};

    fn session() -> Session {
        Session::new(UserId::new("U1"), SceneId::new("start"))
    }

    #[test]
    fn test_none_is_noop() {
        let mut session = session();
        apply_delta(&mut session, None);
        assert_eq!(session.attributes, Attributes::new());
    }

    #[test]
    fn test_all_four_attributes() {
        let mut session = session();
        let delta = AttributeDelta::new()
            .with(Attribute::Memory, 1)
            .with(Attribute::Bond, 2)
            .with(Attribute::Resolve, 3)
            .with(Attribute::Curiosity, 4);

        apply_delta(&mut session, Some(&delta));
        apply_delta(&mut session, Some(&delta));

        assert_eq!(session.attributes, Attributes::from_values(2, 4, 6, 8));
    }

    #[test]
    fn test_negative_delta() {
        let mut session = session();
        apply_delta(
            &mut session,
            Some(&AttributeDelta::new().with(Attribute::Resolve, -2)),
        );
        assert_eq!(session.attributes.resolve, -2);
    }
}
