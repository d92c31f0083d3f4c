//! Native search-engine requests.

use reqwest::Method;
use serde_json::{json, Value as Json};

#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Delete(Delete),
    DeleteByQuery(DeleteByQuery),
    Get(Get),
    Index(Index),
    MultiGet(MultiGet),
    Search(Search),
    Update(Update),
}

/// Inserts or overwrites a document. Without an id the engine assigns one.
#[derive(Debug, Clone, PartialEq)]
pub struct Index {
    pub index: String,
    pub ty: String,
    pub id: Option<String>,
    pub body: Json,
}

/// Fetches one document by id.
#[derive(Debug, Clone, PartialEq)]
pub struct Get {
    pub index: String,
    pub ty: String,
    pub id: String,
    pub fields: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Search {
    pub index: String,
    pub ty: String,
    pub from: u64,
    pub size: u64,
    pub body: Json,
    pub fields: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MultiGet {
    pub index: String,
    pub ty: String,
    pub ids: Vec<Json>,
}

/// Partial update of one document.
#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    pub index: String,
    pub ty: String,
    pub id: String,
    pub body: Json,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Delete {
    pub index: String,
    pub ty: String,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeleteByQuery {
    pub index: String,
    pub ty: String,
    pub body: Json,
}

/// An HTTP request against the engine's REST API.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Request {
    pub(crate) method: Method,
    pub(crate) path: Vec<String>,
    pub(crate) query: Vec<(&'static str, String)>,
    pub(crate) body: Option<Json>,
}

impl Operation {
    pub fn index(&self) -> &str {
        match self {
            Operation::Delete(op) => &op.index,
            Operation::DeleteByQuery(op) => &op.index,
            Operation::Get(op) => &op.index,
            Operation::Index(op) => &op.index,
            Operation::MultiGet(op) => &op.index,
            Operation::Search(op) => &op.index,
            Operation::Update(op) => &op.index,
        }
    }

    pub(crate) fn request(&self) -> Request {
        match self {
            Operation::Index(op) => {
                let (index, ty) = (op.index.as_str(), op.ty.as_str());
                match &op.id {
                    Some(id) => Request::new(Method::PUT, [index, ty, id.as_str()]),
                    None => Request::new(Method::POST, [index, ty]),
                }
                .body(op.body.clone())
            }
            Operation::Get(op) => {
                Request::new(Method::GET, [op.index.as_str(), op.ty.as_str(), op.id.as_str()])
                    .fields(&op.fields)
            }
            Operation::Search(op) => {
                Request::new(Method::POST, [op.index.as_str(), op.ty.as_str(), "_search"])
                    .param("from", op.from.to_string())
                    .param("size", op.size.to_string())
                    .fields(&op.fields)
                    .body(op.body.clone())
            }
            Operation::MultiGet(op) => {
                Request::new(Method::POST, [op.index.as_str(), op.ty.as_str(), "_mget"])
                    .body(json!({ "ids": op.ids }))
            }
            Operation::Update(op) => {
                let path = [op.index.as_str(), op.ty.as_str(), op.id.as_str(), "_update"];
                Request::new(Method::POST, path).body(op.body.clone())
            }
            Operation::Delete(op) => {
                Request::new(Method::DELETE, [op.index.as_str(), op.ty.as_str(), op.id.as_str()])
            }
            Operation::DeleteByQuery(op) => {
                Request::new(Method::DELETE, [op.index.as_str(), op.ty.as_str(), "_query"])
                    .body(op.body.clone())
            }
        }
    }
}

impl Request {
    fn new<const N: usize>(method: Method, path: [&str; N]) -> Self {
        Self {
            method,
            path: path.iter().map(|segment| segment.to_string()).collect(),
            query: vec![],
            body: None,
        }
    }

    fn param(mut self, key: &'static str, value: String) -> Self {
        self.query.push((key, value));
        self
    }

    fn fields(self, fields: &Option<Vec<String>>) -> Self {
        match fields {
            Some(fields) if !fields.is_empty() => self.param("fields", fields.join(",")),
            _ => self,
        }
    }

    fn body(mut self, body: Json) -> Self {
        self.body = Some(body);
        self
    }
}

macro_rules! impl_from {
    ($($ty:ident)*) => {
        $(
            impl From<$ty> for Operation {
                fn from(value: $ty) -> Self {
                    Self::$ty(value)
                }
            }
        )*
    };
}

impl_from!(Delete DeleteByQuery Get Index MultiGet Search Update);
