//! Generic create/update/delete reconciliation of a persisted collection
//! against desired state, scoped by a predicate
//!
//! Implemented once and reused by every hour-kind bucket; the scope
//! predicate keeps one bucket's rewrite from touching rows of another
//! bucket sharing the same table.

use std::collections::HashMap;
use std::hash::Hash;

use crate::error::AppResult;

/// Outcome of diffing desired state against the persisted rows in scope
#[derive(Debug, Clone)]
pub struct ReconcilePlan<T, R> {
    /// Desired items with no persisted counterpart
    pub to_create: Vec<T>,
    /// Persisted rows paired with the desired state that overwrites them
    pub to_update: Vec<(R, T)>,
    /// Persisted rows in scope claimed by no desired item
    pub to_delete: Vec<R>,
}

/// Diff `desired` against the rows of `persisted` matching `scope`.
///
/// `row_key` computes the identity of a persisted row and `desired_key`
/// the identity of a desired item: `Ok(None)` marks a brand new item, an
/// error aborts the whole bucket before anything is classified. Applying
/// the returned plan leaves the rows in scope in 1:1 correspondence with
/// `desired`; re-running with unchanged input yields empty `to_create`
/// and `to_delete`.
pub fn reconcile<T, R, K>(
    desired: Vec<T>,
    persisted: &[R],
    scope: impl Fn(&R) -> bool,
    row_key: impl Fn(&R) -> K,
    desired_key: impl Fn(&T) -> AppResult<Option<K>>,
) -> AppResult<ReconcilePlan<T, R>>
where
    R: Clone,
    K: Eq + Hash,
{
    // Resolve every identity up front so one unresolvable item fails the
    // bucket with nothing partially classified
    let mut keyed = Vec::with_capacity(desired.len());
    for item in desired {
        let key = desired_key(&item)?;
        keyed.push((key, item));
    }

    let in_scope: Vec<&R> = persisted.iter().filter(|r| scope(r)).collect();
    let mut index_by_key: HashMap<K, usize> = in_scope
        .iter()
        .enumerate()
        .map(|(i, row)| (row_key(row), i))
        .collect();

    let mut plan = ReconcilePlan {
        to_create: Vec::new(),
        to_update: Vec::new(),
        to_delete: Vec::new(),
    };

    let mut claimed = vec![false; in_scope.len()];
    for (key, item) in keyed {
        match key.and_then(|k| index_by_key.remove(&k)) {
            Some(i) => {
                claimed[i] = true;
                plan.to_update.push((in_scope[i].clone(), item));
            }
            None => plan.to_create.push(item),
        }
    }
    for (i, row) in in_scope.iter().enumerate() {
        if !claimed[i] {
            plan.to_delete.push((*row).clone());
        }
    }

    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: i32,
        bucket: char,
        value: &'static str,
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: Option<i32>,
        value: &'static str,
    }

    fn row(id: i32, bucket: char, value: &'static str) -> Row {
        Row { id, bucket, value }
    }

    fn persisted() -> Vec<Row> {
        vec![
            row(1, 'a', "one"),
            row(2, 'a', "two"),
            row(3, 'b', "three"),
        ]
    }

    #[test]
    fn test_create_update_delete_membership() {
        let desired = vec![
            Item { id: Some(2), value: "two updated" },
            Item { id: None, value: "new" },
        ];
        let plan = reconcile(
            desired,
            &persisted(),
            |r| r.bucket == 'a',
            |r| r.id,
            |i: &Item| Ok(i.id),
        )
        .unwrap();

        assert_eq!(plan.to_create, vec![Item { id: None, value: "new" }]);
        assert_eq!(plan.to_update.len(), 1);
        assert_eq!(plan.to_update[0].0.id, 2);
        assert_eq!(plan.to_delete, vec![row(1, 'a', "one")]);
    }

    #[test]
    fn test_scope_isolation() {
        // Emptying bucket 'a' must never delete bucket 'b' rows
        let plan = reconcile(
            Vec::<Item>::new(),
            &persisted(),
            |r| r.bucket == 'a',
            |r| r.id,
            |i: &Item| Ok(i.id),
        )
        .unwrap();

        assert!(plan.to_delete.iter().all(|r| r.bucket == 'a'));
        assert_eq!(plan.to_delete.len(), 2);
    }

    #[test]
    fn test_idempotent_second_pass() {
        let desired = vec![
            Item { id: Some(1), value: "one" },
            Item { id: Some(2), value: "two" },
        ];
        let plan = reconcile(
            desired,
            &persisted(),
            |r| r.bucket == 'a',
            |r| r.id,
            |i: &Item| Ok(i.id),
        )
        .unwrap();

        assert!(plan.to_create.is_empty());
        assert!(plan.to_delete.is_empty());
        assert_eq!(plan.to_update.len(), 2);
    }

    #[test]
    fn test_unresolvable_identity_aborts_bucket() {
        let desired = vec![
            Item { id: Some(1), value: "one" },
            Item { id: Some(99), value: "broken" },
        ];
        let result = reconcile(
            desired,
            &persisted(),
            |r| r.bucket == 'a',
            |r| r.id,
            |i: &Item| {
                if i.value == "broken" {
                    Err(AppError::Reconciliation("identity not computable".into()))
                } else {
                    Ok(i.id)
                }
            },
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_keyed_item_without_match_is_created() {
        let desired = vec![Item { id: Some(42), value: "ghost" }];
        let plan = reconcile(
            desired,
            &persisted(),
            |r| r.bucket == 'a',
            |r| r.id,
            |i: &Item| Ok(i.id),
        )
        .unwrap();

        assert_eq!(plan.to_create.len(), 1);
        assert_eq!(plan.to_delete.len(), 2);
    }
}
