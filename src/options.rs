//! 搜索选项派生
//!
//! 把编辑器层的搜索标志与行尾模式换算成引擎编译选项。
//! 选项同时充当编译缓存键的一部分，必须可比较。

use serde::{Deserialize, Serialize};

/// 文档的行尾模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EolMode {
    #[default]
    Lf,
    Cr,
    CrLf,
}

/// 一次搜索调用的全部参数
///
/// `range_start > range_end` 表示向后搜索
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub range_start: usize,
    pub range_end: usize,
    pub case_sensitive: bool,
    pub whole_word: bool,
    pub word_start: bool,
    /// `.` 是否匹配换行符
    pub dot_matches_newline: bool,
    pub eol_mode: EolMode,
}

impl SearchRequest {
    /// 默认参数：区分大小写，普通前向搜索
    pub fn new(range_start: usize, range_end: usize) -> Self {
        Self {
            range_start,
            range_end,
            case_sensitive: true,
            whole_word: false,
            word_start: false,
            dot_matches_newline: false,
            eol_mode: EolMode::default(),
        }
    }
}

/// 引擎编译/搜索选项
///
/// 字段逐一展开而不用位集，便于比较与序列化。
/// 引擎没有对应开关的字段只作为缓存键参与比较。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOptions {
    pub case_insensitive: bool,
    pub dot_matches_newline: bool,
    /// `^` 和 `$` 匹配行边界（始终开启）
    pub multiline: bool,
    /// 扩展语法（始终关闭）
    pub extended: bool,
    /// 编号捕获组（始终开启）
    pub capture_groups: bool,
    /// 范围起点不在文档开头
    pub not_begin_of_line: bool,
    /// 范围终点不在文档末尾
    pub not_end_of_line: bool,
    /// CRLF 行尾感知
    pub crlf_newline: bool,
}

/// 由请求与归一化后的范围派生选项，纯函数
pub fn derive_options(
    req: &SearchRequest,
    low: usize,
    high: usize,
    doc_len: usize,
) -> SearchOptions {
    SearchOptions {
        case_insensitive: !req.case_sensitive,
        dot_matches_newline: req.dot_matches_newline,
        multiline: true,
        extended: false,
        capture_groups: true,
        not_begin_of_line: low != 0,
        not_end_of_line: high != doc_len,
        crlf_newline: req.eol_mode == EolMode::CrLf,
    }
}
