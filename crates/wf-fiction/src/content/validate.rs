//! Cross-reference checks over a content registry.

use std::fmt;

use super::ContentRegistry;
use super::scene::HotspotAction;

/// A problem found in content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentIssue {
    /// What the issue was found on, e.g. `node 3` or `scene 'control_room'`.
    pub subject: String,
    /// Human-readable description.
    pub message: String,
    /// Whether this is an error (true) or a warning (false).
    pub is_error: bool,
}

impl ContentIssue {
    fn error(subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            message: message.into(),
            is_error: true,
        }
    }

    fn warning(subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            message: message.into(),
            is_error: false,
        }
    }
}

impl fmt::Display for ContentIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = if self.is_error { "error" } else { "warning" };
        write!(f, "{level}: {}: {}", self.subject, self.message)
    }
}

/// Check every cross reference in `content`.
///
/// Dangling references are errors; they would surface at runtime as
/// `CONTENT ERROR` lines. Dead ends such as nodes without choices are
/// warnings.
pub fn validate(content: &ContentRegistry) -> Vec<ContentIssue> {
    let mut issues = Vec::new();

    if !content.scenes.contains(&content.start_scene) {
        issues.push(ContentIssue::error(
            "content",
            format!("start scene '{}' is not registered", content.start_scene),
        ));
    }

    check_scenes(content, &mut issues);
    check_dialogue(content, &mut issues);
    check_quests(content, &mut issues);
    check_tokens(content, &mut issues);
    issues
}

/// Whether `id` survives a save file, which splits records on whitespace.
fn is_token(id: &str) -> bool {
    !id.is_empty() && !id.chars().any(char::is_whitespace)
}

fn token(issues: &mut Vec<ContentIssue>, subject: &str, what: &str, id: &str) {
    if !is_token(id) {
        issues.push(ContentIssue::error(
            subject,
            format!("{what} '{id}' must be a single word to be saved"),
        ));
    }
}

fn check_tokens(content: &ContentRegistry, issues: &mut Vec<ContentIssue>) {
    token(issues, "content", "start scene", content.start_scene.as_str());

    for scene in content.scenes.iter() {
        let subject = format!("scene '{}'", scene.id);
        token(issues, &subject, "scene id", scene.id.as_str());
        for hotspot in &scene.hotspots {
            let subject = format!("{subject} hotspot '{}'", hotspot.label);
            match &hotspot.action {
                HotspotAction::Transition { to, .. } => {
                    token(issues, &subject, "scene id", to.as_str());
                }
                HotspotAction::StartQuest(quest) => {
                    token(issues, &subject, "quest id", quest.as_str());
                }
                HotspotAction::GrantFlag(flag) => token(issues, &subject, "flag", flag),
                HotspotAction::Dialogue(_) => {}
            }
        }
    }

    for (id, node) in content.dialogue.iter() {
        for (index, choice) in node.choices.iter().enumerate() {
            let subject = format!("node {id} choice {}", index + 1);
            let flags = [&choice.set_flag, &choice.gate.requires, &choice.gate.blocks_if];
            for flag in flags.into_iter().flatten() {
                token(issues, &subject, "flag", flag);
            }
            if let Some(quest) = &choice.start_quest {
                token(issues, &subject, "quest id", quest.as_str());
            }
        }
    }

    for quest in &content.quests {
        let subject = format!("quest '{}'", quest.id);
        token(issues, &subject, "quest id", quest.id.as_str());
        for flag in quest.objectives.iter().flat_map(|o| &o.done_by) {
            token(issues, &subject, "flag", flag);
        }
    }

    for event in &content.ambient {
        let subject = format!("ambient '{}'", event.id);
        for flag in [&event.requires_flag, &event.grants_flag].into_iter().flatten() {
            token(issues, &subject, "flag", flag);
        }
    }
}

fn check_scenes(content: &ContentRegistry, issues: &mut Vec<ContentIssue>) {
    for scene in content.scenes.iter() {
        let subject = format!("scene '{}'", scene.id);
        if scene.hotspots.is_empty() {
            issues.push(ContentIssue::warning(&subject, "no hotspots"));
        }
        for hotspot in &scene.hotspots {
            let problem = match &hotspot.action {
                HotspotAction::Dialogue(node) if !content.dialogue.contains(*node) => {
                    Some(format!("opens missing dialogue node {node}"))
                }
                HotspotAction::Transition { to, .. } if !content.scenes.contains(to) => {
                    Some(format!("leads to unknown scene '{to}'"))
                }
                HotspotAction::StartQuest(quest) if !content.has_quest(quest) => {
                    Some(format!("starts unknown quest '{quest}'"))
                }
                _ => None,
            };
            if let Some(message) = problem {
                issues.push(ContentIssue::error(
                    format!("{subject} hotspot '{}'", hotspot.label),
                    message,
                ));
            }
        }
    }
}

fn check_dialogue(content: &ContentRegistry, issues: &mut Vec<ContentIssue>) {
    for (id, node) in content.dialogue.iter() {
        let subject = format!("node {id}");
        if node.choices.is_empty() {
            issues.push(ContentIssue::warning(&subject, "no choices; the player cannot leave"));
        }
        if let Some(countdown) = node.timeout.filter(|c| c.choice >= node.choices.len()) {
            issues.push(ContentIssue::error(
                &subject,
                format!("timeout picks missing choice {}", countdown.choice),
            ));
        }
        for (index, choice) in node.choices.iter().enumerate() {
            let choice_subject = format!("{subject} choice {}", index + 1);
            if let Some(next) = choice.goto.filter(|n| !content.dialogue.contains(*n)) {
                issues.push(ContentIssue::error(
                    &choice_subject,
                    format!("goes to missing node {next}"),
                ));
            }
            if let Some(quest) = choice.start_quest.as_ref().filter(|q| !content.has_quest(q)) {
                issues.push(ContentIssue::error(
                    &choice_subject,
                    format!("starts unknown quest '{quest}'"),
                ));
            }
            let gate = &choice.gate;
            if gate.requires.is_some() && gate.requires == gate.blocks_if {
                issues.push(ContentIssue::warning(
                    &choice_subject,
                    "requires and blocks the same flag; it can never be chosen",
                ));
            }
        }
    }
}

fn check_quests(content: &ContentRegistry, issues: &mut Vec<ContentIssue>) {
    for (i, quest) in content.quests.iter().enumerate() {
        let subject = format!("quest '{}'", quest.id);
        if content.quests[..i].iter().any(|q| q.id == quest.id) {
            issues.push(ContentIssue::error(&subject, "duplicate quest id"));
        }
        for (n, objective) in quest.objectives.iter().enumerate() {
            if objective.done_by.is_empty() {
                issues.push(ContentIssue::warning(
                    &subject,
                    format!("objective {} has no clearing flag", n + 1),
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ambient::AmbientEvent;
    use crate::choice::{Choice, DialogueNode};
    use wf_core::{NodeId, Position, Rect, SceneId};

    use crate::content::scene::Scene;

    #[test]
    fn worldforge_is_clean() {
        let issues = validate(&ContentRegistry::worldforge());
        assert!(issues.is_empty(), "unexpected issues: {issues:?}");
    }

    #[test]
    fn dangling_references_are_errors() {
        let mut content = ContentRegistry::worldforge();
        content.dialogue.insert(
            40,
            DialogueNode::new("Ghost", "Nobody answers.")
                .with_choice(Choice::new("Follow").with_goto(41).with_quest("ghost_quest"))
                .with_timeout(5.0, 3),
        );
        content.scenes.insert(
            Scene::new("vent", "VENT")
                .with_hotspot("Crawl", Rect::new(0.0, 0.0, 1.0, 1.0), HotspotAction::Transition {
                    to: SceneId::new("nowhere"),
                    spawn: Position::default(),
                })
                .with_hotspot("Speak", Rect::new(0.0, 0.0, 1.0, 1.0), HotspotAction::Dialogue(NodeId(99))),
        );

        let issues = validate(&content);
        let errors: Vec<_> = issues.iter().filter(|i| i.is_error).collect();
        assert_eq!(errors.len(), 5, "{errors:?}");
        assert!(errors.iter().any(|i| i.message == "goes to missing node 41"));
        assert!(errors.iter().any(|i| i.message == "starts unknown quest 'ghost_quest'"));
        assert!(errors.iter().any(|i| i.message == "timeout picks missing choice 3"));
        assert!(errors.iter().any(|i| i.message == "leads to unknown scene 'nowhere'"));
        assert!(errors.iter().any(|i| i.message == "opens missing dialogue node 99"));
    }

    #[test]
    fn missing_start_scene() {
        let mut content = ContentRegistry::worldforge();
        content.start_scene = SceneId::new("surface");
        let issues = validate(&content);
        assert_eq!(
            issues[0].to_string(),
            "error: content: start scene 'surface' is not registered"
        );
    }

    #[test]
    fn ids_with_whitespace_are_errors() {
        let mut content = ContentRegistry::worldforge();
        content.dialogue.insert(
            41,
            DialogueNode::new("Roster", "Names scroll past.")
                .with_choice(Choice::new("Sign").with_flag("crew roster").with_requirement("")),
        );
        content.scenes.insert(
            Scene::new("mess hall", "MESS").with_hotspot(
                "Board",
                Rect::new(0.0, 0.0, 1.0, 1.0),
                HotspotAction::GrantFlag("notice\tboard".to_string()),
            ),
        );
        content.ambient.push(AmbientEvent::new("drip", "Drip.").grants("wet deck"));

        let errors: Vec<_> = validate(&content)
            .into_iter()
            .filter(|i| i.is_error)
            .map(|i| i.to_string())
            .collect();
        assert_eq!(errors.len(), 5, "{errors:?}");
        assert!(errors.contains(
            &"error: node 41 choice 1: flag 'crew roster' must be a single word to be saved"
                .to_string()
        ));
        assert!(errors.contains(
            &"error: node 41 choice 1: flag '' must be a single word to be saved".to_string()
        ));
        assert!(errors.contains(
            &"error: scene 'mess hall': scene id 'mess hall' must be a single word to be saved"
                .to_string()
        ));
        assert!(errors.iter().any(|e| e.contains("flag 'notice\tboard'")));
        assert!(errors.contains(
            &"error: ambient 'drip': flag 'wet deck' must be a single word to be saved".to_string()
        ));
    }

    #[test]
    fn dead_end_node_is_a_warning() {
        let mut content = ContentRegistry::worldforge();
        content.dialogue.insert(30, DialogueNode::new("Echo", "..."));
        let issues = validate(&content);
        assert_eq!(issues.len(), 1);
        assert!(!issues[0].is_error);
        assert_eq!(issues[0].subject, "node 30");
    }
}
