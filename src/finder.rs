//! 正则搜索驱动
//!
//! 持有编译缓存与最近一次命中状态。引擎只支持向前匹配，
//! 向后搜索用重复向前探测模拟：每次命中后把下界推进
//! `max(1, 命中长度)`，保留扫描到的最后一次命中。

use std::fmt;

use serde::Serialize;
use tracing::{debug, trace};

use crate::document::Document;
use crate::engine::{self, GroupSpans, Matcher};
use crate::options::{derive_options, SearchOptions, SearchRequest};
use crate::replace::{decode_replacement, expand_replacement};
use crate::translate::translate_pattern;

pub type Result<T> = std::result::Result<T, SearchError>;

/// 搜索层错误
///
/// 找不到匹配不是错误（`find` 返回 `Ok(None)`），
/// 这里只区分真正的失败
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// 模式编译失败，携带引擎诊断信息
    InvalidPattern(String),
    /// 引擎内部失败
    Engine(String),
    /// 尚无成功匹配，无法执行替换
    NoActiveMatch,
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::InvalidPattern(msg) => write!(f, "invalid pattern: {}", msg),
            SearchError::Engine(msg) => write!(f, "search engine error: {}", msg),
            SearchError::NoActiveMatch => write!(f, "no active match to substitute"),
        }
    }
}

impl std::error::Error for SearchError {}

/// 一次命中的字节范围
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub start: usize,
    pub end: usize,
}

impl SearchHit {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// 编译缓存：至多一条，模式文本或选项变化才重新编译
struct CachedPattern {
    source: String,
    options: SearchOptions,
    matcher: Matcher,
}

/// 最近一次成功命中，供替换展开消费
struct LastMatch {
    start: usize,
    end: usize,
    groups: GroupSpans,
}

/// 搜索驱动
///
/// 缓存与命中状态都归单个实例独占，
/// 并发搜索会话请使用相互独立的实例。
#[derive(Default)]
pub struct RegexSearcher {
    cached: Option<CachedPattern>,
    last_error: String,
    last_match: Option<LastMatch>,
}

impl RegexSearcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// 最近一次编译失败的诊断信息，供宿主展示
    pub fn last_error(&self) -> &str {
        &self.last_error
    }

    /// 最近一次成功命中
    pub fn last_hit(&self) -> Option<SearchHit> {
        self.last_match.as_ref().map(|m| SearchHit {
            start: m.start,
            end: m.end,
        })
    }

    /// 在文档范围内查找模式
    ///
    /// `range_start > range_end` 时向后搜索，返回区间内最靠后的命中
    /// （按从左到右扫描顺序的最后一个）。空模式不触发引擎，
    /// 直接按未找到处理。成功命中会记录捕获跨度表供 [`substitute`] 用。
    ///
    /// [`substitute`]: RegexSearcher::substitute
    pub fn find<D: Document + ?Sized>(
        &mut self,
        doc: &D,
        pattern: &str,
        req: &SearchRequest,
    ) -> Result<Option<SearchHit>> {
        if pattern.is_empty() {
            return Ok(None);
        }

        let doc_len = doc.len_bytes();
        let start = doc.align_to_char(req.range_start);
        let end = doc.align_to_char(req.range_end);
        let backward = start > end;
        let (low, high) = if backward { (end, start) } else { (start, end) };

        let options = derive_options(req, low, high, doc_len);
        let source = translate_pattern(pattern, req.whole_word, req.word_start, req.eol_mode);
        let matcher = self.ensure_compiled(&source, options)?;

        let text = doc.text();
        let text = text.as_ref();

        let mut best = matcher.search(text, low, high);
        if backward {
            // 向后搜索：从左到右反复探测，保留最后一次命中。
            // 零长度命中也至少推进一个字节，保证终止。
            while let Some(last) = &best {
                let mut next_low = last.start + (last.end - last.start).max(1);
                while next_low < text.len() && !text.is_char_boundary(next_low) {
                    next_low += 1;
                }
                if next_low > high {
                    break;
                }
                match matcher.search(text, next_low, high) {
                    Some(next) => best = Some(next),
                    None => break,
                }
            }
        }

        match best {
            Some(m) => {
                trace!(start = m.start, end = m.end, backward, "pattern matched");
                let hit = SearchHit {
                    start: m.start,
                    end: m.end,
                };
                self.last_match = Some(LastMatch {
                    start: m.start,
                    end: m.end,
                    groups: m.groups,
                });
                Ok(Some(hit))
            }
            None => {
                self.last_match = None;
                Ok(None)
            }
        }
    }

    /// 用最近一次命中的捕获跨度展开替换模板
    ///
    /// 只有紧跟在成功的 [`find`] 之后、文档未被改动时才有意义，
    /// 这是调用方契约，这里只校验是否存在命中状态。
    ///
    /// [`find`]: RegexSearcher::find
    pub fn substitute<D: Document + ?Sized>(&self, doc: &D, template: &str) -> Result<String> {
        let last = self.last_match.as_ref().ok_or(SearchError::NoActiveMatch)?;
        let decoded = decode_replacement(template);
        let text = doc.text();
        Ok(expand_replacement(&decoded, text.as_ref(), &last.groups))
    }

    /// 缓存命中则复用，否则先释放旧匹配器再重新编译
    fn ensure_compiled(&mut self, source: &str, options: SearchOptions) -> Result<&Matcher> {
        let fresh = self
            .cached
            .as_ref()
            .is_some_and(|c| c.source == source && c.options == options);

        if !fresh {
            // 先释放旧的匹配器，编译失败时缓存保持为空
            self.cached = None;
            self.last_error.clear();
            match engine::compile(source, options) {
                Ok(matcher) => {
                    debug!(pattern = source, "compiled translated pattern");
                    self.cached = Some(CachedPattern {
                        source: source.to_owned(),
                        options,
                        matcher,
                    });
                }
                Err(message) => {
                    self.last_error = message.clone();
                    return Err(SearchError::InvalidPattern(message));
                }
            }
        }

        self.cached
            .as_ref()
            .map(|c| &c.matcher)
            .ok_or_else(|| SearchError::Engine("pattern cache empty after compile".to_owned()))
    }

    #[cfg(test)]
    fn cached_source(&self) -> Option<&str> {
        self.cached.as_ref().map(|c| c.source.as_str())
    }

    #[cfg(test)]
    fn group_span(&self, idx: usize) -> Option<std::ops::Range<usize>> {
        self.last_match
            .as_ref()
            .and_then(|m| m.groups.get(idx).cloned())
            .flatten()
    }
}
