//! JSON response envelopes and the pagination response shaper.
//!
//! Every body the API writes is one of three envelopes:
//!
//! - **Plain** ([`SingleResponse`]): `{ "data": ..., "meta": { "status", "message" } }`
//! - **Paginated** ([`PaginatedResponse`]): plain plus `meta.pagination`
//! - **Vue table** ([`VueTableResponse`]): flat paging fields next to `data`/`meta`,
//!   in the shape vuetable-style clients expect
//!
//! [`ResponseShaper::shape`] picks the envelope for list responses from the
//! `paginate` / `vue` flags of the [`PageRequest`].

use axum::http::StatusCode;
use serde::Serialize;
use serde_with::skip_serializing_none;

use crate::api::dto::page_request::PageRequest;
use crate::utils::query_string::query_without;

/// Message returned in `meta.message` on success.
pub const SUCCESS_MESSAGE: &str = "Success";

/// Status code used for every successful response.
pub const SUCCESS_STATUS: StatusCode = StatusCode::CREATED;

/// `meta.message`: plain text on success, `{ "errors": ... }` on failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Message {
    Text(String),
    Errors { errors: String },
}

impl Message {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn errors(errors: impl Into<String>) -> Self {
        Self::Errors {
            errors: errors.into(),
        }
    }
}

/// Response metadata shared by all envelopes.
#[skip_serializing_none]
#[derive(Debug, Serialize)]
pub struct Meta {
    pub status: u16,
    pub message: Message,
    pub pagination: Option<Pagination>,
}

impl Meta {
    pub fn new(status: StatusCode, message: Message) -> Self {
        Self {
            status: status.as_u16(),
            message,
            pagination: None,
        }
    }

    /// Metadata for a successful response.
    pub fn success() -> Self {
        Self::new(SUCCESS_STATUS, Message::text(SUCCESS_MESSAGE))
    }

    pub fn with_pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = Some(pagination);
        self
    }
}

/// Plain `{ data, meta }` envelope.
#[derive(Debug, Serialize)]
pub struct SingleResponse<T> {
    pub data: Option<T>,
    pub meta: Meta,
}

impl<T> SingleResponse<T> {
    /// Successful response carrying `data`.
    pub fn new(data: T) -> Self {
        Self {
            data: Some(data),
            meta: Meta::success(),
        }
    }

    /// Response with `"data": null`.
    pub fn empty(meta: Meta) -> Self {
        Self { data: None, meta }
    }
}

/// Body written for every error.
pub type ErrorResponse = SingleResponse<()>;

/// Next/previous page URLs. Absent links are omitted.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PageLinks {
    pub next: Option<String>,
    pub prev: Option<String>,
}

impl PageLinks {
    /// Computes links for `page` out of `total_pages`.
    ///
    /// No links are produced when `page` lies outside `1..=total_pages`.
    /// Inside the range, `next` is dropped on the last page and `prev` on the
    /// first one. `rest` is appended verbatim after `page=N`.
    pub fn compute(page: u32, total_pages: u64, path: &str, rest: &str) -> Self {
        let page = u64::from(page);
        if page < 1 || page > total_pages {
            return Self::default();
        }

        let link = |target: u64| format!("{path}?page={target}{rest}");

        Self {
            next: (page != total_pages).then(|| link(page + 1)),
            prev: (page != 1).then(|| link(page - 1)),
        }
    }
}

/// `meta.pagination` block of the standard paginated envelope.
#[derive(Debug, Serialize)]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u64,
    pub per_page: u32,
    pub total: u64,
    pub count: usize,
    pub links: PageLinks,
}

/// Standard paginated envelope.
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub meta: Meta,
}

/// Vue-table paginated envelope.
#[derive(Debug, Serialize)]
pub struct VueTableResponse<T> {
    pub data: Vec<T>,
    pub meta: Meta,
    pub current_page: u32,
    pub from: u64,
    pub last_page: u64,
    pub per_page: u32,
    pub to: u64,
    pub total: u64,
    pub path: String,
    pub next_page_url: Option<String>,
    pub prev_page_url: Option<String>,
}

/// One of the three list envelopes.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Envelope<T> {
    Plain(SingleResponse<Vec<T>>),
    Paginated(PaginatedResponse<T>),
    VueTable(VueTableResponse<T>),
}

/// Number of pages needed for `total` items at `per_page` items each.
pub fn total_pages(total: u64, per_page: u32) -> u64 {
    total.div_ceil(u64::from(per_page.max(1)))
}

/// Builds list envelopes for one resource collection.
#[derive(Debug, Clone)]
pub struct ResponseShaper {
    path: String,
    vue_page_size: u32,
}

impl ResponseShaper {
    /// Creates a shaper for the collection at `app_host` + `resource`.
    ///
    /// `vue_page_size` is the row count used to compute the Vue envelope's
    /// `from`/`to`; it does not follow the request's `per_page`.
    pub fn new(app_host: &str, resource: &str, vue_page_size: u32) -> Self {
        Self {
            path: format!("{}{}", app_host.trim_end_matches('/'), resource),
            vue_page_size,
        }
    }

    /// Absolute collection URL used as the link base.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Wraps one page of `items` in the envelope selected by `request`.
    ///
    /// `total` is the size of the whole collection and `raw_query` the
    /// request's query string; every parameter but `page` is carried over
    /// into the generated links.
    pub fn shape<T>(
        &self,
        request: &PageRequest,
        items: Vec<T>,
        total: u64,
        raw_query: Option<&str>,
    ) -> Envelope<T> {
        if !request.is_paginated() {
            return Envelope::Plain(SingleResponse::new(items));
        }

        let total_pages = total_pages(total, request.per_page);
        let rest = query_without(raw_query, "page");
        let links = PageLinks::compute(request.page, total_pages, &self.path, &rest);

        if request.is_vue() {
            let size = u64::from(self.vue_page_size);
            let page = u64::from(request.page);

            return Envelope::VueTable(VueTableResponse {
                data: items,
                meta: Meta::success(),
                current_page: request.page,
                from: page.saturating_sub(1) * size + 1,
                last_page: total_pages,
                per_page: request.per_page,
                to: page * size,
                total,
                path: self.path.clone(),
                next_page_url: links.next,
                prev_page_url: links.prev,
            });
        }

        let pagination = Pagination {
            current_page: request.page,
            total_pages,
            per_page: request.per_page,
            total,
            count: items.len(),
            links,
        };

        Envelope::Paginated(PaginatedResponse {
            data: items,
            meta: Meta::success().with_pagination(pagination),
        })
    }
}
