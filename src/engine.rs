//! 正则引擎适配层
//!
//! 封装 regress（EcmaScript 语法，支持环视与后行断言）。
//! 对上层只暴露两个能力：编译模式得到匹配器，
//! 以及在 `[low, high)` 范围内向前搜索一次。

use std::ops::Range;

use crate::options::SearchOptions;

/// 捕获组跨度表，下标 0 为整体匹配，未参与的组为 None
pub(crate) type GroupSpans = Vec<Option<Range<usize>>>;

/// 一次引擎命中
pub(crate) struct EngineMatch {
    pub start: usize,
    pub end: usize,
    pub groups: GroupSpans,
}

/// 编译后的匹配器句柄，随缓存条目一起释放
#[derive(Debug)]
pub(crate) struct Matcher {
    regex: regress::Regex,
}

/// 编译翻译后的模式，失败时返回引擎的诊断文本
pub(crate) fn compile(pattern: &str, options: SearchOptions) -> Result<Matcher, String> {
    // not_begin_of_line / not_end_of_line / crlf_newline 没有引擎开关，
    // 只作为缓存键参与比较
    let flags = regress::Flags {
        icase: options.case_insensitive,
        multiline: options.multiline,
        dot_all: options.dot_matches_newline,
        ..Default::default()
    };
    let regex = regress::Regex::with_flags(pattern, flags).map_err(|e| e.to_string())?;
    Ok(Matcher { regex })
}

impl Matcher {
    /// 在 `[low, high)` 中向前搜索首个匹配。
    ///
    /// 传入完整文档文本，行锚点与环视可以看到范围之外的内容；
    /// `high` 只约束匹配的起点，匹配本身可以越过 `high` 延伸。
    pub fn search(&self, text: &str, low: usize, high: usize) -> Option<EngineMatch> {
        let m = self.regex.find_from(text, low).next()?;
        if m.start() >= high {
            return None;
        }
        let groups: GroupSpans = m.groups().collect();
        Some(EngineMatch {
            start: m.start(),
            end: m.end(),
            groups,
        })
    }
}
