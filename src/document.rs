//! 文档边界
//!
//! 搜索层对宿主文本缓冲区的最小只读接口。
//! 引擎需要一次性的连续文本视图，rope 只在不连续时才复制。

use std::borrow::Cow;

use ropey::Rope;

/// 搜索层看到的文档
pub trait Document {
    /// 字节长度
    fn len_bytes(&self) -> usize;

    /// 完整文本视图
    fn text(&self) -> Cow<'_, str>;

    /// 把位置移出多字节字符内部（向文档开头取整），并截断到文档长度
    fn align_to_char(&self, pos: usize) -> usize;
}

impl Document for str {
    fn len_bytes(&self) -> usize {
        self.len()
    }

    fn text(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }

    fn align_to_char(&self, pos: usize) -> usize {
        let mut pos = pos.min(self.len());
        while pos > 0 && !self.is_char_boundary(pos) {
            pos -= 1;
        }
        pos
    }
}

impl Document for Rope {
    fn len_bytes(&self) -> usize {
        Rope::len_bytes(self)
    }

    fn text(&self) -> Cow<'_, str> {
        self.slice(..).into()
    }

    fn align_to_char(&self, pos: usize) -> usize {
        let pos = pos.min(Rope::len_bytes(self));
        self.char_to_byte(self.byte_to_char(pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_str_align_to_char() {
        let s = "a\u{4e2d}b"; // 中 占 3 字节
        assert_eq!(s.align_to_char(0), 0);
        assert_eq!(s.align_to_char(1), 1);
        assert_eq!(s.align_to_char(2), 1);
        assert_eq!(s.align_to_char(3), 1);
        assert_eq!(s.align_to_char(4), 4);
        assert_eq!(s.align_to_char(99), 5);
    }

    #[test]
    fn test_rope_text_and_align() {
        let rope = Rope::from_str("hello 中文 world");
        assert_eq!(rope.text().as_ref(), "hello 中文 world");
        assert_eq!(Document::len_bytes(&rope), "hello 中文 world".len());
        // 7 落在 "中" 内部，取整回 6
        assert_eq!(rope.align_to_char(7), 6);
        assert_eq!(rope.align_to_char(6), 6);
    }
}
