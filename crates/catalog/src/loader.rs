use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

use futures::FutureExt as _;
use futures::future::{LocalBoxFuture, Shared};

use crate::{Catalog, CatalogError};

/// Where the raw catalog payloads come from.
pub trait CatalogSource {
    fn fetch_books(&self) -> impl Future<Output = Result<String, CatalogError>>;
    fn fetch_volumes(&self) -> impl Future<Output = Result<String, CatalogError>>;
}

/// Fetches both payloads concurrently and builds the catalog once both land.
pub async fn load<S: CatalogSource>(source: &S) -> Result<Catalog, CatalogError> {
    let (books, volumes) = futures::join!(source.fetch_books(), source.fetch_volumes());
    Catalog::from_json(&books?, &volumes?)
}

type SharedLoad = Shared<LocalBoxFuture<'static, Result<Rc<Catalog>, CatalogError>>>;

#[derive(Default)]
enum CellState {
    #[default]
    Empty,
    Loading(SharedLoad),
    Ready(Rc<Catalog>),
}

/// Memoized catalog initializer.
///
/// Callers arriving while a load is in flight await that same load; once it
/// succeeds every later call returns the cached catalog. A failed load is
/// handed to all of its waiters and then forgotten so the next call retries.
#[derive(Default)]
pub struct CatalogCell {
    state: RefCell<CellState>,
}

impl CatalogCell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<Rc<Catalog>> {
        match &*self.state.borrow() {
            CellState::Ready(catalog) => Some(catalog.clone()),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(&*self.state.borrow(), CellState::Loading(_))
    }

    pub async fn get_or_load<S>(&self, source: S) -> Result<Rc<Catalog>, CatalogError>
    where
        S: CatalogSource + 'static,
    {
        let pending = {
            let mut state = self.state.borrow_mut();
            match &*state {
                CellState::Ready(catalog) => return Ok(catalog.clone()),
                CellState::Loading(pending) => pending.clone(),
                CellState::Empty => {
                    let pending = async move { load(&source).await.map(Rc::new) }
                        .boxed_local()
                        .shared();
                    *state = CellState::Loading(pending.clone());
                    pending
                }
            }
        };

        let result = pending.clone().await;

        let mut state = self.state.borrow_mut();
        let still_current = matches!(&*state, CellState::Loading(p) if p.ptr_eq(&pending));
        if still_current {
            *state = match &result {
                Ok(catalog) => CellState::Ready(catalog.clone()),
                Err(_) => CellState::Empty,
            };
        }
        result
    }
}
