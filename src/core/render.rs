use crate::domain::model::{GroupedBatch, RenderedGroup};

/// One block per group: `SEV:<n> <source> <appname>` and its lines.
pub fn render_groups(batch: &GroupedBatch) -> Vec<RenderedGroup> {
    batch
        .iter()
        .filter(|(_, lines)| !lines.is_empty())
        .map(|(key, lines)| RenderedGroup {
            title: key.to_string(),
            text: format!("\n{}", lines.join("\n")),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::GroupKey;

    #[test]
    fn test_render_groups() {
        let mut batch = GroupedBatch::new();
        let key = GroupKey {
            severity: 3,
            source: "app".to_string(),
            appname: "web".to_string(),
        };
        batch.push(key.clone(), "t1: a".to_string());
        batch.push(key, "t2: b".to_string());

        let rendered = render_groups(&batch);
        assert_eq!(
            rendered,
            vec![RenderedGroup {
                title: "SEV:3 app web".to_string(),
                text: "\nt1: a\nt2: b".to_string(),
            }]
        );
    }

    #[test]
    fn test_render_empty_batch() {
        assert!(render_groups(&GroupedBatch::new()).is_empty());
    }
}
