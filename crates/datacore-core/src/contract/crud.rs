//! Add/update/delete callbacks shared by both theme variants.

use std::fmt;
use std::rc::Rc;

use futures::future::LocalBoxFuture;

use crate::error::ApiError;

/// Pending completion returned by every callback.
pub type Pending = LocalBoxFuture<'static, Result<(), ApiError>>;

type AddFn<D> = dyn Fn(D) -> Pending;
type UpdateFn<D> = dyn Fn(u64, D) -> Pending;
type DeleteFn = dyn Fn(u64) -> Pending;

/// The `{onAdd, onUpdate, onDelete}` triple a shared component receives.
///
/// Equality is by pointer identity so the callbacks can be used as props.
pub struct CrudCallbacks<D> {
    on_add: Rc<AddFn<D>>,
    on_update: Rc<UpdateFn<D>>,
    on_delete: Rc<DeleteFn>,
}

impl<D> Clone for CrudCallbacks<D> {
    fn clone(&self) -> Self {
        Self {
            on_add: self.on_add.clone(),
            on_update: self.on_update.clone(),
            on_delete: self.on_delete.clone(),
        }
    }
}

impl<D> PartialEq for CrudCallbacks<D> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.on_add, &other.on_add)
            && Rc::ptr_eq(&self.on_update, &other.on_update)
            && Rc::ptr_eq(&self.on_delete, &other.on_delete)
    }
}

impl<D> fmt::Debug for CrudCallbacks<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CrudCallbacks").finish_non_exhaustive()
    }
}

impl<D: 'static> CrudCallbacks<D> {
    pub fn new(
        on_add: impl Fn(D) -> Pending + 'static,
        on_update: impl Fn(u64, D) -> Pending + 'static,
        on_delete: impl Fn(u64) -> Pending + 'static,
    ) -> Self {
        Self {
            on_add: Rc::new(on_add),
            on_update: Rc::new(on_update),
            on_delete: Rc::new(on_delete),
        }
    }

    pub fn add(&self, data: D) -> Pending {
        (self.on_add)(data)
    }

    pub fn update(&self, id: u64, data: D) -> Pending {
        (self.on_update)(id, data)
    }

    pub fn delete(&self, id: u64) -> Pending {
        (self.on_delete)(id)
    }

    /// Delete only after explicit confirmation; cancelling does nothing.
    pub fn delete_confirmed(&self, id: u64, confirmation: Confirmation) -> Option<Pending> {
        match confirmation {
            Confirmation::Confirmed => Some(self.delete(id)),
            Confirmation::Cancelled => None,
        }
    }
}

/// Answer to a destructive-action prompt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Cancelled,
}

/// A completion that resolves immediately.
pub fn ready(result: Result<(), ApiError>) -> Pending {
    Box::pin(futures::future::ready(result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn recording() -> (CrudCallbacks<String>, Rc<RefCell<Vec<String>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let (a, u, d) = (log.clone(), log.clone(), log.clone());
        let callbacks = CrudCallbacks::new(
            move |data: String| {
                a.borrow_mut().push(format!("add {}", data));
                ready(Ok(()))
            },
            move |id, data: String| {
                u.borrow_mut().push(format!("update {} {}", id, data));
                ready(Ok(()))
            },
            move |id| {
                d.borrow_mut().push(format!("delete {}", id));
                ready(Err(ApiError::new("gone")))
            },
        );
        (callbacks, log)
    }

    #[test]
    fn test_callbacks_forward() {
        let (callbacks, log) = recording();
        tokio_test::block_on(callbacks.add("x".to_string())).unwrap();
        tokio_test::block_on(callbacks.update(3, "y".to_string())).unwrap();
        let err = tokio_test::block_on(callbacks.delete(4)).unwrap_err();

        assert_eq!(err.message, "gone");
        assert_eq!(*log.borrow(), vec!["add x", "update 3 y", "delete 4"]);
    }

    #[test]
    fn test_cancelled_delete_is_noop() {
        let (callbacks, log) = recording();
        assert!(callbacks.delete_confirmed(1, Confirmation::Cancelled).is_none());
        assert!(log.borrow().is_empty());
        assert!(callbacks.delete_confirmed(1, Confirmation::Confirmed).is_some());
        assert_eq!(*log.borrow(), vec!["delete 1"]);
    }

    #[test]
    fn test_clone_is_equal() {
        let (callbacks, _) = recording();
        assert_eq!(callbacks.clone(), callbacks);
    }
}
