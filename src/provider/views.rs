//! Data types exposed by the quick verse provider.
//!
//! Every data type is a projection of the one verse cache in
//! [`ViewEngine`]; they differ in selector shape and in which writes they
//! accept.
//!
//! | Data type | Selector            | Set value                  |
//! |-----------|---------------------|----------------------------|
//! | `Verse`   | reference           | [`VerseSetData`]           |
//! | `Heresy`  | reference           | text, implicitly authorized |
//! | `Chapter` | `(book, chapter)`   | never accepted             |

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use super::engine::ViewEngine;
use super::error::{ProviderError, ProviderResult};
use super::gate::VerseSetData;
use super::notify::UpdateInstruction;

/// Closed set of data types a provider can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DataType {
    Verse,
    Heresy,
    Chapter,
}

impl DataType {
    pub const ALL: [DataType; 3] = [DataType::Verse, DataType::Heresy, DataType::Chapter];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Verse => "Verse",
            Self::Heresy => "Heresy",
            Self::Chapter => "Chapter",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A chapter address: book name and chapter number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterRef {
    pub book: String,
    pub chapter: u32,
}

impl ChapterRef {
    pub fn new(book: impl Into<String>, chapter: u32) -> Self {
        Self {
            book: book.into(),
            chapter,
        }
    }

    /// Project onto the reference key space shared with verse selectors.
    pub fn to_reference(&self) -> String {
        format!("{} {}", self.book.trim(), self.chapter)
    }
}

/// Selector passed to a data type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// Reference string, `"latest"`, or `"notify"`.
    Reference(String),
    Chapter(ChapterRef),
}

impl Selector {
    fn kind(&self) -> &'static str {
        match self {
            Self::Reference(_) => "reference",
            Self::Chapter(_) => "chapter",
        }
    }

    fn reference(&self, data_type: DataType) -> ProviderResult<&str> {
        match self {
            Self::Reference(raw) => Ok(raw),
            other => Err(ProviderError::SelectorMismatch {
                data_type,
                selector: other.kind(),
            }),
        }
    }

    fn chapter(&self, data_type: DataType) -> ProviderResult<&ChapterRef> {
        match self {
            Self::Chapter(chapter) => Ok(chapter),
            other => Err(ProviderError::SelectorMismatch {
                data_type,
                selector: other.kind(),
            }),
        }
    }
}

impl From<&str> for Selector {
    fn from(raw: &str) -> Self {
        Self::Reference(raw.to_string())
    }
}

impl From<ChapterRef> for Selector {
    fn from(chapter: ChapterRef) -> Self {
        Self::Chapter(chapter)
    }
}

/// Value passed to a data type's set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetValue {
    Verse(VerseSetData),
    Heresy(String),
}

impl SetValue {
    fn kind(&self) -> &'static str {
        match self {
            Self::Verse(_) => "verse",
            Self::Heresy(_) => "heresy",
        }
    }
}

pub type ViewFuture<'a, T> = Pin<Box<dyn Future<Output = ProviderResult<T>> + Send + 'a>>;

/// Read handler of a data type.
pub type GetFn = for<'a> fn(&'a ViewEngine, &'a Selector) -> ViewFuture<'a, Option<String>>;

/// Write handler of a data type.
pub type SetFn =
    for<'a> fn(&'a ViewEngine, &'a Selector, SetValue) -> ViewFuture<'a, UpdateInstruction>;

pub fn get_verse<'a>(
    engine: &'a ViewEngine,
    selector: &'a Selector,
) -> ViewFuture<'a, Option<String>> {
    Box::pin(async move {
        let raw = selector.reference(DataType::Verse)?;
        Ok(engine.get(raw).await)
    })
}

pub fn set_verse<'a>(
    engine: &'a ViewEngine,
    selector: &'a Selector,
    value: SetValue,
) -> ViewFuture<'a, UpdateInstruction> {
    Box::pin(async move {
        let raw = selector.reference(DataType::Verse)?;
        match value {
            SetValue::Verse(data) => Ok(engine.set(raw, data).await),
            other => Err(ProviderError::ValueMismatch {
                data_type: DataType::Verse,
                value: other.kind(),
            }),
        }
    })
}

pub fn get_heresy<'a>(
    engine: &'a ViewEngine,
    selector: &'a Selector,
) -> ViewFuture<'a, Option<String>> {
    Box::pin(async move {
        let raw = selector.reference(DataType::Heresy)?;
        Ok(engine.get(raw).await)
    })
}

/// Writing through `Heresy` is the acknowledgment itself.
pub fn set_heresy<'a>(
    engine: &'a ViewEngine,
    selector: &'a Selector,
    value: SetValue,
) -> ViewFuture<'a, UpdateInstruction> {
    Box::pin(async move {
        let raw = selector.reference(DataType::Heresy)?;
        match value {
            SetValue::Heresy(text) => Ok(engine.set(raw, VerseSetData::heresy(text)).await),
            other => Err(ProviderError::ValueMismatch {
                data_type: DataType::Heresy,
                value: other.kind(),
            }),
        }
    })
}

pub fn get_chapter<'a>(
    engine: &'a ViewEngine,
    selector: &'a Selector,
) -> ViewFuture<'a, Option<String>> {
    Box::pin(async move {
        let chapter = selector.chapter(DataType::Chapter)?;
        Ok(engine.get(&chapter.to_reference()).await)
    })
}

/// Chapters are read-only.
pub fn set_chapter<'a>(
    _engine: &'a ViewEngine,
    selector: &'a Selector,
    _value: SetValue,
) -> ViewFuture<'a, UpdateInstruction> {
    Box::pin(async move {
        selector.chapter(DataType::Chapter)?;
        Ok(UpdateInstruction::Unchanged)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::engine::EngineOptions;
    use crate::provider::notify::UpdateBus;
    use crate::provider::testing::FakeSource;
    use std::sync::Arc;

    fn engine() -> ViewEngine {
        ViewEngine::new(
            Arc::new(FakeSource::default().with_text("john 11", "chapter eleven")),
            UpdateBus::new("test.provider"),
            EngineOptions::default(),
        )
    }

    #[test]
    fn test_chapter_projection() {
        assert_eq!(ChapterRef::new("John", 11).to_reference(), "John 11");
        assert_eq!(ChapterRef::new(" 1 John ", 2).to_reference(), "1 John 2");
    }

    #[tokio::test]
    async fn test_chapter_reads_shared_entry() {
        let engine = engine();
        let chapter = Selector::from(ChapterRef::new("John", 11));

        let text = get_chapter(&engine, &chapter).await.unwrap();
        assert_eq!(text.as_deref(), Some("chapter eleven"));

        // A verse write to the projected key is visible through the chapter
        set_heresy(&engine, &Selector::from("JOHN 11"), SetValue::Heresy("rewritten".into()))
            .await
            .unwrap();
        let text = get_chapter(&engine, &chapter).await.unwrap();
        assert_eq!(text.as_deref(), Some("[warning 1] rewritten"));
    }

    #[tokio::test]
    async fn test_chapter_set_always_rejected() {
        let engine = engine();
        let chapter = Selector::from(ChapterRef::new("John", 11));

        let result = set_chapter(&engine, &chapter, SetValue::Heresy("x".into()))
            .await
            .unwrap();
        assert_eq!(result, UpdateInstruction::Unchanged);
        assert_eq!(engine.mutation_count().await, 0);
    }

    #[tokio::test]
    async fn test_heresy_write_visible_to_verse() {
        let engine = engine();
        let selector = Selector::from("Romans 1:16");

        let instruction = set_heresy(&engine, &selector, SetValue::Heresy("Heretical text".into()))
            .await
            .unwrap();
        assert_eq!(instruction, UpdateInstruction::All);

        let text = get_verse(&engine, &selector).await.unwrap();
        assert_eq!(text.as_deref(), Some("[warning 1] Heretical text"));
    }

    #[tokio::test]
    async fn test_verse_bare_text_rejected() {
        let engine = engine();
        let selector = Selector::from("Romans 1:16");

        let value = SetValue::Verse(VerseSetData::Text("x".into()));
        let instruction = set_verse(&engine, &selector, value).await.unwrap();
        assert_eq!(instruction, UpdateInstruction::Unchanged);
    }

    #[tokio::test]
    async fn test_selector_shape_mismatch() {
        let engine = engine();

        let err = get_verse(&engine, &Selector::from(ChapterRef::new("John", 11)))
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::SelectorMismatch { data_type: DataType::Verse, .. }));

        let err = set_verse(&engine, &Selector::from("john 3:16"), SetValue::Heresy("x".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::ValueMismatch { .. }));
    }
}
