//! 模板建议引擎
//!
//! 两种模式的纯解析/编辑模型：
//! - 实时补全：光标处探测未闭合的 `{{`，对候选表达式排序后替换片段
//! - 显式选择器：与光标上下文无关，按分组列出并插入完整 `{{expr}}` token
//!
//! 两种模式都是 `(text, cursor, mappings)` 的纯函数，不依赖计时器或网络。

mod candidates;
mod context;
mod insert;

pub use candidates::{candidate_pool, rank_candidates, Candidate, MAX_SUGGESTIONS, RUNTIME_HINTS};
pub use context::{token_context, TokenContext};
pub use insert::{apply_suggestion, insert_token, picker_groups, Insertion, PickerGroup, PickerItem};

use crate::mapping::Mapping;

/// 一步到位的补全查询：探测上下文并返回排序后的候选
pub fn suggestions(text: &str, cursor: usize, mappings: &[Mapping]) -> Option<(TokenContext, Vec<Candidate>)> {
    let ctx = token_context(text, cursor)?;
    let pool = candidate_pool(mappings);
    let ranked = rank_candidates(&pool, &ctx.query);
    Some((ctx, ranked))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::NodeKind;

    fn mapping(target_key: &str, source_output: &str) -> Mapping {
        Mapping {
            edge_id: "e1".into(),
            source_id: "rag1".into(),
            source_name: "Retriever".into(),
            source_kind: NodeKind::RagRetriever,
            source_output: source_output.into(),
            target_key: target_key.into(),
        }
    }

    #[test]
    fn test_suggestions_end_to_end() {
        let mappings = vec![mapping("documents", "documents")];
        let text = "Answer with {{doc";
        let (ctx, ranked) = suggestions(text, text.len(), &mappings).unwrap();
        assert_eq!(ctx.query, "doc");
        assert_eq!(ranked[0].expr, "documents");

        let inserted = apply_suggestion(text, &ctx, &ranked[0].expr);
        assert_eq!(inserted.text, "Answer with {{documents}}");
    }

    #[test]
    fn test_no_open_token_is_no_context() {
        assert!(suggestions("plain text", 5, &[]).is_none());
    }
}
