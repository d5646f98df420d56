//! The fixed rewrite rule table.
//!
//! Rules run in table order, each on the output of the previous one. Gated
//! rules first check that the whole file carries their signature before
//! attempting the block substitution.

use regex::{Captures, NoExpand, Regex};
use std::borrow::Cow;
use std::sync::LazyLock;

/// The login-flow step every rewritten file starts with.
pub const LOGIN_FLOW_LINE: &str = "- runFlow: flows/login_testuser1.yaml";

/// Presence of this text means the login flow is already wired in.
const LOGIN_MARKER: &str = "runFlow: flows/login_testuser1.yaml";
const LOGIN_COMMENT: &str = "# Start with fresh login";

const MANY_FRIENDS_BLOCK: &str = "- runScript:\n    script: cd .maestro/helpers && ./setup_many_friends.sh 2 10\n    timeout: 30000\n\n";
const LARGE_GROUP_BLOCK: &str = "- runScript:\n    script: cd .maestro/helpers && ./setup_large_group.sh LargeTestGroup 1 11 7200\n    timeout: 30000\n\n";
const FRIEND_REQUEST_BLOCK: &str = "- runScript:\n    script: cd .maestro/helpers && ./setup_friend_with_location.sh testuser2\n    timeout: 10000\n\n";
const CATCH_ALL_BLOCK: &str = "# TODO: Complex runScript converted - verify API setup\n- delay: 3000\n\n";

/// How many matches a substitution rule rewrites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleScope {
    /// Only the leftmost match.
    First,
    /// Every non-overlapping match.
    All,
}

#[derive(Debug, Clone)]
pub enum Replacement {
    /// Fixed text, inserted verbatim (no `$` expansion).
    Literal(&'static str),
    /// `- delay: <n>` where `<n>` is capture group 1 read as an integer.
    Delay,
}

#[derive(Debug, Clone)]
pub enum RuleKind {
    /// Insert the login flow after the document separator when missing.
    InjectLogin,
    Substitute {
        gate: Option<Regex>,
        pattern: Regex,
        replacement: Replacement,
        scope: RuleScope,
    },
}

#[derive(Debug, Clone)]
pub struct Rule {
    pub name: &'static str,
    pub description: &'static str,
    pub kind: RuleKind,
}

impl Rule {
    fn substitute(
        name: &'static str,
        description: &'static str,
        gate: Option<&str>,
        pattern: &str,
        replacement: Replacement,
        scope: RuleScope,
    ) -> Self {
        Self {
            name,
            description,
            kind: RuleKind::Substitute {
                gate: gate.map(|g| Regex::new(g).expect("rule gate must compile")),
                pattern: Regex::new(pattern).expect("rule pattern must compile"),
                replacement,
                scope,
            },
        }
    }

    /// Apply this rule. Returns the input borrowed when nothing changed.
    pub fn apply<'a>(&self, content: &'a str) -> Cow<'a, str> {
        match &self.kind {
            RuleKind::InjectLogin => inject_login(content),
            RuleKind::Substitute {
                gate,
                pattern,
                replacement,
                scope,
            } => {
                if gate.as_ref().is_some_and(|g| !g.is_match(content)) {
                    return Cow::Borrowed(content);
                }
                let limit = match scope {
                    RuleScope::First => 1,
                    RuleScope::All => 0,
                };
                match replacement {
                    Replacement::Literal(text) => pattern.replacen(content, limit, NoExpand(*text)),
                    Replacement::Delay => pattern.replacen(content, limit, |caps: &Captures| {
                        format!("- delay: {}\n\n", integer_text(&caps[1]))
                    }),
                }
            },
        }
    }

    pub fn is_gated(&self) -> bool {
        matches!(self.kind, RuleKind::Substitute { gate: Some(_), .. })
    }

    pub fn scope(&self) -> RuleScope {
        match self.kind {
            RuleKind::InjectLogin => RuleScope::First,
            RuleKind::Substitute { scope, .. } => scope,
        }
    }

    /// What the rule writes in place of a match, for listings.
    pub fn replacement_text(&self) -> String {
        match &self.kind {
            RuleKind::InjectLogin => format!("{}\n{}", LOGIN_COMMENT, LOGIN_FLOW_LINE),
            RuleKind::Substitute { replacement, .. } => match replacement {
                Replacement::Literal(text) => text.trim_end().to_string(),
                Replacement::Delay => "- delay: <DURATION_MS>".to_string(),
            },
        }
    }
}

/// Decimal digits with leading zeros dropped, `"0"` for all zeros.
fn integer_text(digits: &str) -> &str {
    let trimmed = digits.trim_start_matches('0');
    if trimmed.is_empty() {
        "0"
    } else {
        trimmed
    }
}

/// Insert the login flow right after the first `---` line and any blank or
/// comment lines that follow it. Content that already runs the login flow,
/// or has no separator, comes back borrowed.
pub fn inject_login(content: &str) -> Cow<'_, str> {
    if content.contains(LOGIN_MARKER) {
        return Cow::Borrowed(content);
    }

    let mut lines: Vec<&str> = content.split('\n').collect();
    let Some(separator) = lines.iter().position(|line| line.trim() == "---") else {
        return Cow::Borrowed(content);
    };

    let mut insert_at = separator + 1;
    while insert_at < lines.len() {
        let line = lines[insert_at].trim();
        if line.is_empty() || line.starts_with('#') {
            insert_at += 1;
        } else {
            break;
        }
    }

    let tail = lines.split_off(insert_at);
    lines.extend(["", LOGIN_COMMENT, LOGIN_FLOW_LINE, ""]);
    lines.extend(tail);
    Cow::Owned(lines.join("\n"))
}

static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        Rule {
            name: "login",
            description: "Start the flow with a fresh login",
            kind: RuleKind::InjectLogin,
        },
        Rule::substitute(
            "many-friends",
            "Loop of logins, friend requests and location sends",
            Some(r"(?s)for i in.*\{2\.\..*\}.*api_login.*api_send_friend_request.*api_send_location"),
            r"(?s)- runScript:\s*\n\s*script: \|[^-]*?for i in.*?\{2\.\..*?\}.*?api_login.*?api_send_friend_request.*?api_send_location.*?wait\s*\n\s*timeout:.*?\n",
            Replacement::Literal(MANY_FRIENDS_BLOCK),
            RuleScope::First,
        ),
        Rule::substitute(
            "large-group",
            "Group creation followed by room joins",
            Some(r"(?s)api_create_group.*api_join_room"),
            r"(?s)- runScript:\s*\n\s*script: \|[^-]*?api_create_group.*?api_join_room.*?wait\s*\n",
            Replacement::Literal(LARGE_GROUP_BLOCK),
            RuleScope::First,
        ),
        Rule::substitute(
            "friend-request",
            "testuser2 logs in and sends testuser1 a friend request",
            Some(r"(?s)api_login.*testuser2.*api_send_friend_request.*testuser2.*testuser1"),
            r"(?s)- runScript:\s*\n\s*script: \|[^-]*?api_login.*?testuser2.*?api_send_friend_request.*?testuser2.*?testuser1[^-]*?\n",
            Replacement::Literal(FRIEND_REQUEST_BLOCK),
            RuleScope::First,
        ),
        Rule::substitute(
            "friend-request-file",
            "api_send_friend_request.js from testuser2 to testuser1",
            None,
            r"- runScript:\s*\n\s*file: scripts/api_send_friend_request\.js\s*\n\s*env:\s*\n\s*FROM_USER: testuser2\s*\n\s*TO_USER: testuser1\s*\n",
            Replacement::Literal(FRIEND_REQUEST_BLOCK),
            RuleScope::All,
        ),
        Rule::substitute(
            "sleep",
            "sleep.js with DURATION_MS becomes a delay step",
            None,
            r#"- runScript:\s*\n\s*file: scripts/sleep\.js\s*\n\s*env:\s*\n\s*DURATION_MS: ["']?([0-9]+)["']?\s*\n"#,
            Replacement::Delay,
            RuleScope::All,
        ),
        Rule::substitute(
            "catch-all",
            "Any other inline script block ending in a timeout",
            None,
            r"(?s)- runScript:\s*\n\s*script: \|[^-]*?(\n[ ]*[^-#\n][^\n]*)*\n\s*timeout:.*?\n",
            Replacement::Literal(CATCH_ALL_BLOCK),
            RuleScope::All,
        ),
    ]
});

/// All rules in application order.
pub fn rule_table() -> &'static [Rule] {
    &RULES
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(name: &str) -> &'static Rule {
        rule_table()
            .iter()
            .find(|r| r.name == name)
            .unwrap_or_else(|| panic!("no rule named {name}"))
    }

    #[test]
    fn test_table_order() {
        let names: Vec<_> = rule_table().iter().map(|r| r.name).collect();
        assert_eq!(
            names,
            vec![
                "login",
                "many-friends",
                "large-group",
                "friend-request",
                "friend-request-file",
                "sleep",
                "catch-all"
            ]
        );
    }

    #[test]
    fn test_gates_and_scopes() {
        assert!(rule("many-friends").is_gated());
        assert!(rule("large-group").is_gated());
        assert!(rule("friend-request").is_gated());
        assert!(!rule("sleep").is_gated());
        assert_eq!(rule("many-friends").scope(), RuleScope::First);
        assert_eq!(rule("catch-all").scope(), RuleScope::All);
    }

    #[test]
    fn test_inject_login_after_separator_and_comments() {
        let input = "appId: com.example\n---\n# Flow: map\n\n- launchApp\n";
        let output = inject_login(input);
        assert_eq!(
            output,
            "appId: com.example\n---\n# Flow: map\n\n\n# Start with fresh login\n- runFlow: flows/login_testuser1.yaml\n\n- launchApp\n"
        );
    }

    #[test]
    fn test_inject_login_at_end_of_file() {
        let output = inject_login("appId: x\n---");
        assert_eq!(
            output,
            "appId: x\n---\n\n# Start with fresh login\n- runFlow: flows/login_testuser1.yaml\n"
        );
    }

    #[test]
    fn test_inject_login_skips_when_present() {
        let input = "---\n- runFlow: flows/login_testuser1.yaml\n- launchApp\n";
        assert!(matches!(inject_login(input), Cow::Borrowed(_)));
    }

    #[test]
    fn test_inject_login_needs_separator() {
        let input = "appId: x\n- launchApp\n";
        assert!(matches!(inject_login(input), Cow::Borrowed(_)));
    }

    #[test]
    fn test_inject_login_uses_first_separator() {
        let output = inject_login("a\n  ---  \nb\n---\nc");
        assert!(output.starts_with(
            "a\n  ---  \n\n# Start with fresh login\n- runFlow: flows/login_testuser1.yaml\n\nb\n---\nc"
        ));
    }

    #[test]
    fn test_sleep_quoted_and_bare() {
        let input = "- runScript:\n    file: scripts/sleep.js\n    env:\n      DURATION_MS: '0250'\n- tapOn: a\n- runScript:\n    file: scripts/sleep.js\n    env:\n      DURATION_MS: 900\n- tapOn: b\n";
        let output = rule("sleep").apply(input);
        assert_eq!(output, "- delay: 250\n\n- tapOn: a\n- delay: 900\n\n- tapOn: b\n");
    }

    #[test]
    fn test_sleep_all_zeros() {
        let input = "- runScript:\n  file: scripts/sleep.js\n  env:\n    DURATION_MS: \"000\"\n";
        assert_eq!(rule("sleep").apply(input), "- delay: 0\n\n");
    }

    #[test]
    fn test_friend_request_file() {
        let input = "- runScript:\n    file: scripts/api_send_friend_request.js\n    env:\n      FROM_USER: testuser2\n      TO_USER: testuser1\n- assertVisible: x\n";
        let output = rule("friend-request-file").apply(input);
        assert_eq!(
            output,
            "- runScript:\n    script: cd .maestro/helpers && ./setup_friend_with_location.sh testuser2\n    timeout: 10000\n\n- assertVisible: x\n"
        );
    }

    #[test]
    fn test_friend_request_file_other_users_untouched() {
        let input = "- runScript:\n    file: scripts/api_send_friend_request.js\n    env:\n      FROM_USER: testuser3\n      TO_USER: testuser1\n";
        assert!(matches!(
            rule("friend-request-file").apply(input),
            Cow::Borrowed(_)
        ));
    }

    #[test]
    fn test_gate_blocks_substitution() {
        // Looks like a block but the file never names api_join_room.
        let input = "- runScript:\n    script: |\n      api_create_group g\n      wait\n";
        assert!(matches!(rule("large-group").apply(input), Cow::Borrowed(_)));
    }

    #[test]
    fn test_gated_rule_rewrites_only_first_match() {
        let block = "- runScript:\n    script: |\n      api_create_group G\n      api_join_room G u\n      wait\n";
        let input = format!("{block}{block}");
        let output = rule("large-group").apply(&input);
        assert_eq!(output.matches("setup_large_group.sh").count(), 1);
        assert_eq!(output.matches("api_create_group").count(), 1);
    }

    #[test]
    fn test_catch_all() {
        let input = "- runScript:\n    script: |\n      curl http://localhost/api/reset\n      echo done\n    timeout: 5000\n- tapOn: OK\n";
        assert_eq!(
            rule("catch-all").apply(input),
            "# TODO: Complex runScript converted - verify API setup\n- delay: 3000\n\n- tapOn: OK\n"
        );
    }

    #[test]
    fn test_replacement_text_is_not_expanded() {
        assert_eq!(
            rule("friend-request").replacement_text(),
            "- runScript:\n    script: cd .maestro/helpers && ./setup_friend_with_location.sh testuser2\n    timeout: 10000"
        );
        assert_eq!(rule("sleep").replacement_text(), "- delay: <DURATION_MS>");
    }
}
