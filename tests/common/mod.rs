//! In-memory collaborators shared by the integration tests.
#![allow(dead_code)]

use notion_import::{
    AccessToken, AppError, Block, BlockCommon, BlockId, BulletedListItemBlock, HeadingBlock,
    NewNote, NotesStore, NotionConnector, NotionId, NotionImport, NotionRepository,
    PageMetadata, PageProperty, ParagraphBlock, PersistedNote, RichTextItem, TextBlockContent,
    UserId,
};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

pub const PAGE_ID: &str = "0123456789abcdef0123456789abcdef";
pub const USER_ID: &str = "user-1";
pub const PROJECT_ID: &str = "brain-1";
pub const TOKEN: &str = "secret_notion_token";

/// A Notion workspace held in memory.
#[derive(Default)]
pub struct FakeNotion {
    pub pages: HashMap<String, PageMetadata>,
    pub children: HashMap<String, Vec<Block>>,
    pub failing: HashSet<String>,
    pub connected_with: Mutex<Vec<String>>,
}

impl FakeNotion {
    pub fn with_page(mut self, page: PageMetadata, blocks: Vec<Block>) -> Self {
        let key = NotionId::from(&page.id).as_str().to_string();
        self.children.insert(key.clone(), blocks);
        self.pages.insert(key, page);
        self
    }

    pub fn with_children(mut self, parent: &BlockId, blocks: Vec<Block>) -> Self {
        self.children
            .insert(NotionId::from(parent).as_str().to_string(), blocks);
        self
    }

    pub fn failing_children_of(mut self, parent: &BlockId) -> Self {
        self.failing.insert(NotionId::from(parent).as_str().to_string());
        self
    }
}

#[async_trait::async_trait]
impl NotionRepository for FakeNotion {
    async fn retrieve_page(&self, id: &NotionId) -> Result<PageMetadata, AppError> {
        self.pages.get(id.as_str()).cloned().ok_or_else(|| {
            AppError::Validation(format!("Could not find page with ID: {}", id))
        })
    }

    async fn retrieve_children(
        &self,
        parent: &NotionId,
        _page_size: Option<usize>,
    ) -> Result<Vec<Block>, AppError> {
        if self.failing.contains(parent.as_str()) {
            return Err(AppError::Validation("simulated nested failure".to_string()));
        }
        Ok(self.children.get(parent.as_str()).cloned().unwrap_or_default())
    }

    async fn search_pages(&self, _query: Option<&str>) -> Result<Vec<PageMetadata>, AppError> {
        Ok(self.pages.values().cloned().collect())
    }
}

/// Hands out the same in-memory workspace for every token.
pub struct FakeConnector(pub Arc<FakeNotion>);

impl NotionConnector for FakeConnector {
    fn connect(&self, token: &AccessToken) -> Result<Arc<dyn NotionRepository>, AppError> {
        self.0
            .connected_with
            .lock()
            .unwrap()
            .push(token.as_str().to_string());
        Ok(self.0.clone())
    }
}

/// A notes store keeping rows in memory.
#[derive(Default)]
pub struct FakeStore {
    pub tokens: HashMap<String, String>,
    pub notes: Mutex<Vec<NewNote>>,
    pub reject_inserts: Option<String>,
}

impl FakeStore {
    pub fn connected() -> Self {
        let mut tokens = HashMap::new();
        tokens.insert(USER_ID.to_string(), TOKEN.to_string());
        Self {
            tokens,
            ..Default::default()
        }
    }
}

#[async_trait::async_trait]
impl NotesStore for FakeStore {
    async fn notion_access_token(&self, user: &UserId) -> Result<Option<AccessToken>, AppError> {
        match self.tokens.get(user.as_str()) {
            Some(token) => Ok(Some(AccessToken::new(token.clone())?)),
            None => Ok(None),
        }
    }

    async fn insert_note(&self, note: NewNote) -> Result<PersistedNote, AppError> {
        if let Some(message) = &self.reject_inserts {
            return Err(AppError::Persistence {
                message: message.clone(),
            });
        }
        let mut notes = self.notes.lock().unwrap();
        let row = PersistedNote {
            id: format!("note-{}", notes.len() + 1),
            project_id: note.project_id.to_string(),
            user_id: note.user_id.to_string(),
            title: note.title.clone(),
            content: note.content.clone(),
            tags: note.tags.clone(),
            source_metadata: Some(serde_json::to_value(&note.source_metadata).unwrap()),
            created_at: Some("2024-03-07T10:00:00Z".to_string()),
            extra: Default::default(),
        };
        notes.push(note);
        Ok(row)
    }
}

pub fn import_service(notion: FakeNotion, store: Arc<FakeStore>) -> NotionImport {
    NotionImport::new(store, Arc::new(FakeConnector(Arc::new(notion))))
}

// --- Fixtures ---

pub fn page(properties: Vec<(&str, PageProperty)>) -> PageMetadata {
    PageMetadata {
        id: notion_import::PageId::parse(PAGE_ID).unwrap(),
        url: format!("https://www.notion.so/Q3-Plan-{}", PAGE_ID),
        last_edited_time: Some("2024-03-01T09:30:00.000Z".to_string()),
        archived: false,
        properties: properties
            .into_iter()
            .map(|(name, property)| (name.to_string(), property))
            .collect(),
    }
}

pub fn title_property(text: &str) -> PageProperty {
    PageProperty::title(vec![RichTextItem::plain(text)])
}

pub fn block_id(n: u8) -> BlockId {
    BlockId::parse(&format!("{:032x}", n)).unwrap()
}

pub fn text(s: &str) -> TextBlockContent {
    TextBlockContent::new(vec![RichTextItem::plain(s)])
}

pub fn heading_1(s: &str) -> Block {
    Block::Heading(HeadingBlock {
        common: BlockCommon::default(),
        level: 1,
        content: text(s),
    })
}

pub fn bullet(s: &str) -> Block {
    Block::BulletedListItem(BulletedListItemBlock {
        common: BlockCommon::default(),
        content: text(s),
    })
}

pub fn paragraph(s: &str) -> Block {
    Block::Paragraph(ParagraphBlock {
        common: BlockCommon::default(),
        content: text(s),
    })
}

/// A bullet with the given id that reports nested children.
pub fn parent_bullet(id: BlockId, s: &str) -> Block {
    let mut common = BlockCommon::new(id);
    common.has_children = true;
    Block::BulletedListItem(BulletedListItemBlock {
        common,
        content: text(s),
    })
}

/// The "Q3 Plan" page: a heading and two bullets.
pub fn q3_plan() -> FakeNotion {
    FakeNotion::default().with_page(
        page(vec![("Name", title_property("Q3 Plan"))]),
        vec![heading_1("Goals"), bullet("Grow 10%"), bullet("Ship v2")],
    )
}
