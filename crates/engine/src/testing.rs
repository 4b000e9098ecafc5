//! In-memory API used by the engine tests

use std::sync::Mutex;

use async_trait::async_trait;
use community_core::{AdminError, AdminResult, FieldDescriptor, Record, RecordId, Schema};

use crate::api::{CommunityApi, PageQuery};
use crate::pagination::Page;

/// Request observed by the fake
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Schema,
    Page(PageQuery),
    Create(Record),
    Update(Record),
    Delete(RecordId),
}

#[derive(Debug, Default)]
struct State {
    records: Vec<Record>,
    next_id: RecordId,
    calls: Vec<Call>,
}

/// Community store backed by a vector
#[derive(Debug)]
pub struct FakeApi {
    schema: Schema,
    state: Mutex<State>,
    report_total: bool,
    fail_schema: bool,
    fail_pages: bool,
    fail_mutations: bool,
}

pub fn sample_schema() -> Schema {
    Schema::new(vec![
        FieldDescriptor::text("name", "Name").required(),
        FieldDescriptor::number("subs", "Subscribers").required(),
        FieldDescriptor::enumeration("status", "Status", ["active", "blocked"]),
        FieldDescriptor::date("createdAt", "Created"),
        FieldDescriptor::date("updatedAt", "Updated"),
    ])
}

impl FakeApi {
    pub fn new() -> Self {
        Self {
            schema: sample_schema(),
            state: Mutex::new(State {
                next_id: 1,
                ..State::default()
            }),
            report_total: false,
            fail_schema: false,
            fail_pages: false,
            fail_mutations: false,
        }
    }

    /// Store `count` records with ids 1..=count
    pub fn with_records(self, count: u64) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            for id in 1..=count {
                state.records.push(
                    Record::new()
                        .with_id(id)
                        .with_value("name", format!("Community {id}"))
                        .with_value("subs", id as i64 * 10),
                );
            }
            state.next_id = count + 1;
        }
        self
    }

    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.schema = schema;
        self
    }

    pub fn reporting_total(mut self) -> Self {
        self.report_total = true;
        self
    }

    pub fn failing_schema(mut self) -> Self {
        self.fail_schema = true;
        self
    }

    pub fn failing_pages(mut self) -> Self {
        self.fail_pages = true;
        self
    }

    pub fn failing_mutations(mut self) -> Self {
        self.fail_mutations = true;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.lock().unwrap().calls.clear();
    }

    pub fn records(&self) -> Vec<Record> {
        self.state.lock().unwrap().records.clone()
    }

    fn record(&self, call: Call) -> std::sync::MutexGuard<'_, State> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        state
    }
}

fn server_error() -> AdminError {
    AdminError::Http {
        status: 500,
        message: "Internal Server Error".to_string(),
    }
}

#[async_trait]
impl CommunityApi for FakeApi {
    async fn fetch_schema(&self) -> AdminResult<Schema> {
        self.record(Call::Schema);
        if self.fail_schema {
            return Err(server_error());
        }
        Ok(self.schema.clone())
    }

    async fn fetch_page(&self, query: &PageQuery) -> AdminResult<Page> {
        let state = self.record(Call::Page(query.clone()));
        if self.fail_pages {
            return Err(server_error());
        }
        let start = (query.page.saturating_sub(1) * query.limit) as usize;
        let items: Vec<Record> = state
            .records
            .iter()
            .skip(start)
            .take(query.limit as usize)
            .cloned()
            .collect();
        let total = self.report_total.then_some(state.records.len() as u64);
        Ok(Page::from_response(items, query.page, query.limit, total))
    }

    async fn create(&self, record: &Record) -> AdminResult<Record> {
        let mut state = self.record(Call::Create(record.clone()));
        if self.fail_mutations {
            return Err(server_error());
        }
        let mut stored = record.clone();
        stored.id = Some(state.next_id);
        state.next_id += 1;
        state.records.push(stored.clone());
        Ok(stored)
    }

    async fn update(&self, record: &Record) -> AdminResult<Record> {
        let mut state = self.record(Call::Update(record.clone()));
        if self.fail_mutations {
            return Err(server_error());
        }
        let slot = state
            .records
            .iter_mut()
            .find(|r| r.id.is_some() && r.id == record.id)
            .ok_or_else(|| AdminError::Http {
                status: 404,
                message: "Not Found".to_string(),
            })?;
        *slot = record.clone();
        Ok(record.clone())
    }

    async fn delete(&self, id: RecordId) -> AdminResult<()> {
        let mut state = self.record(Call::Delete(id));
        if self.fail_mutations {
            return Err(server_error());
        }
        state.records.retain(|r| r.id != Some(id));
        Ok(())
    }
}
