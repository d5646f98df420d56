use crate::rules::rule_table;
use regex::Regex;
use std::sync::LazyLock;

static INLINE_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"- runScript:\s*\n\s*script: \|").expect("inline block pattern must compile")
});

/// Result of running the rule pipeline over one file's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub content: String,
    /// Names of the rules that changed the text, in application order.
    pub fired: Vec<&'static str>,
    /// Inline `script: |` blocks no rule managed to convert.
    pub leftover_blocks: usize,
}

impl Rewrite {
    pub fn changed(&self, original: &str) -> bool {
        self.content != original
    }
}

/// Run every rule in order, each on the previous rule's output.
pub fn rewrite(content: &str) -> Rewrite {
    let mut current = content.to_string();
    let mut fired = Vec::new();

    for rule in rule_table() {
        let next = rule.apply(&current);
        if next != current.as_str() {
            tracing::debug!(rule = rule.name, "rule rewrote content");
            fired.push(rule.name);
            current = next.into_owned();
        }
    }

    let leftover_blocks = count_inline_blocks(&current);
    Rewrite {
        content: current,
        fired,
        leftover_blocks,
    }
}

/// The rewritten text alone.
pub fn fix_individual_file(content: &str) -> String {
    rewrite(content).content
}

/// Count inline `- runScript:` / `script: |` blocks in `content`.
pub fn count_inline_blocks(content: &str) -> usize {
    INLINE_BLOCK.find_iter(content).count()
}
