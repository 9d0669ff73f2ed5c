use std::collections::BTreeSet;

use serde::Serialize;

use super::TutorialError;

/// Active chapter of a tutorial. The index never leaves `0..len`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChapterCursor {
    index: usize,
    len: usize,
}

impl ChapterCursor {
    pub fn new(len: usize) -> Result<Self, TutorialError> {
        if len == 0 {
            return Err(TutorialError::NoChapters);
        }
        Ok(Self { index: 0, len })
    }

    pub fn at(len: usize, index: usize) -> Result<Self, TutorialError> {
        let mut cursor = Self::new(len)?;
        cursor.select(index)?;
        Ok(cursor)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn select(&mut self, index: usize) -> Result<(), TutorialError> {
        if index >= self.len {
            return Err(TutorialError::ChapterOutOfRange {
                index,
                len: self.len,
            });
        }
        self.index = index;
        Ok(())
    }

    pub fn next(&mut self) -> usize {
        self.index = (self.index + 1).min(self.len - 1);
        self.index
    }

    pub fn previous(&mut self) -> usize {
        self.index = self.index.saturating_sub(1);
        self.index
    }

    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 == self.len
    }

    /// "Chapter 2 of 3"
    pub fn position(&self) -> String {
        format!("Chapter {} of {}", self.index + 1, self.len)
    }
}

/// Chapters a learner has marked complete.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChapterProgress {
    completed: BTreeSet<String>,
}

impl ChapterProgress {
    /// Flips the chapter and returns whether it is now complete.
    pub fn toggle(&mut self, chapter_id: &str) -> bool {
        if self.completed.remove(chapter_id) {
            false
        } else {
            self.completed.insert(chapter_id.to_string());
            true
        }
    }

    pub fn is_completed(&self, chapter_id: &str) -> bool {
        self.completed.contains(chapter_id)
    }

    pub fn completed(&self) -> impl Iterator<Item = &str> {
        self.completed.iter().map(String::as_str)
    }

    pub fn percent_complete(&self, total_chapters: usize) -> u8 {
        if total_chapters == 0 {
            return 0;
        }
        let done = self.completed.len().min(total_chapters);
        ((done * 100) / total_chapters) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_clamps_at_both_ends() {
        let mut cursor = ChapterCursor::new(3).unwrap();
        assert!(cursor.is_first());
        assert_eq!(cursor.previous(), 0);
        assert_eq!(cursor.next(), 1);
        assert_eq!(cursor.next(), 2);
        assert_eq!(cursor.next(), 2);
        assert!(cursor.is_last());
        assert_eq!(cursor.position(), "Chapter 3 of 3");
    }

    #[test]
    fn test_cursor_rejects_out_of_range() {
        let mut cursor = ChapterCursor::new(3).unwrap();
        assert!(matches!(
            cursor.select(3),
            Err(TutorialError::ChapterOutOfRange { index: 3, len: 3 })
        ));
        assert_eq!(cursor.index(), 0);
        assert!(ChapterCursor::new(0).is_err());
    }

    #[test]
    fn test_toggle_flips_completion() {
        let mut progress = ChapterProgress::default();
        assert!(progress.toggle("2"));
        assert!(progress.is_completed("2"));
        assert_eq!(progress.percent_complete(3), 33);
        assert!(!progress.toggle("2"));
        assert_eq!(progress.percent_complete(3), 0);
    }
}
