//! Social graph command handlers with boundary logging.
//!
//! Each mutating command opens a transaction, binds a `SqliteLedger` to it,
//! runs the core follow/block operation and commits. The read-then-write in
//! `block` (find the edge, then insert or retype) is therefore atomic.
//!
//! Every call gets a fresh `RequestId`, logged on each lifecycle event and
//! attached to any returned error.

#![allow(clippy::result_large_err)]

use modelzoo_core::errors::{ExError, ModelError};
use modelzoo_core::model::{Relation, TwitterUser};
use modelzoo_core::ops::relation_ops;
use modelzoo_core::{log_op_end, log_op_error, log_op_start};
use modelzoo_core_types::RequestId;
use modelzoo_store::errors::{from_rusqlite, Result};
use modelzoo_store::{SqliteLedger, SqliteRepo};
use rusqlite::Connection;
use serde::Serialize;

/// Result of `follow`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FollowOutcome {
    pub relation: Relation,
    /// False when an edge (of either type) already existed
    pub created: bool,
}

/// Which derived view to read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocialView {
    Followers,
    Following,
    BlockList,
    RelationUsers,
}

impl SocialView {
    fn op(&self) -> &'static str {
        match self {
            SocialView::Followers => "followers",
            SocialView::Following => "following",
            SocialView::BlockList => "block_list",
            SocialView::RelationUsers => "relation_users",
        }
    }
}

fn tag(err: ExError, op: &str, request_id: &RequestId) -> ExError {
    err.with_op(op).with_request_id(request_id.clone())
}

fn model_err(err: ModelError, op: &str, request_id: &RequestId) -> ExError {
    tag(err.into(), op, request_id)
}

/// Create a twitter user
///
/// ## Errors
///
/// - `InvalidField`: blank or over-long name
/// - `Persistence`: database error
pub fn user_create(name: &str, conn: &Connection) -> Result<TwitterUser> {
    let request_id = RequestId::new();
    log_op_start!("user_create", request_id = request_id.as_str());
    let start = std::time::Instant::now();

    let user = SqliteRepo::create_twitter_user(conn, name).map_err(|e| {
        let e = tag(e, "user_create", &request_id);
        log_op_error!(
            "user_create",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64,
            request_id = request_id.as_str()
        );
        e
    })?;

    log_op_end!(
        "user_create",
        duration_ms = start.elapsed().as_millis() as u64,
        request_id = request_id.as_str(),
        user_id = user.id
    );

    Ok(user)
}

/// All twitter users in id order
pub fn user_list(conn: &Connection) -> Result<Vec<TwitterUser>> {
    SqliteRepo::list_twitter_users(conn)
}

/// `actor_id` follows `target_id`
///
/// ## Errors
///
/// - `SelfRelation`: actor and target are the same user
/// - `NotFound`: either user is missing
/// - `IntegrityViolation`: the pair's uniqueness was broken underneath the
///   operation; never recovered here
/// - `Persistence`: database error
pub fn follow(actor_id: i64, target_id: i64, conn: &mut Connection) -> Result<FollowOutcome> {
    let request_id = RequestId::new();
    log_op_start!(
        "follow",
        request_id = request_id.as_str(),
        from_user_id = actor_id,
        to_user_id = target_id
    );
    let start = std::time::Instant::now();

    let outcome = follow_impl(actor_id, target_id, conn, &request_id).map_err(|e| {
        log_op_error!(
            "follow",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64,
            request_id = request_id.as_str()
        );
        e
    })?;

    log_op_end!(
        "follow",
        duration_ms = start.elapsed().as_millis() as u64,
        request_id = request_id.as_str(),
        relation_id = outcome.relation.id,
        created = outcome.created
    );

    Ok(outcome)
}

fn follow_impl(
    actor_id: i64,
    target_id: i64,
    conn: &mut Connection,
    request_id: &RequestId,
) -> Result<FollowOutcome> {
    let tx = conn
        .transaction()
        .map_err(|e| tag(from_rusqlite(e), "follow", request_id))?;

    let (relation, created) = {
        let mut ledger = SqliteLedger::new(&tx);
        relation_ops::follow(&mut ledger, actor_id, target_id)
            .map_err(|e| model_err(e, "follow", request_id))?
    };

    tx.commit()
        .map_err(|e| tag(from_rusqlite(e), "follow", request_id))?;

    Ok(FollowOutcome { relation, created })
}

/// `actor_id` blocks `target_id`, converting an existing follow
///
/// ## Errors
///
/// Same as [`follow`].
pub fn block(actor_id: i64, target_id: i64, conn: &mut Connection) -> Result<Relation> {
    let request_id = RequestId::new();
    log_op_start!(
        "block",
        request_id = request_id.as_str(),
        from_user_id = actor_id,
        to_user_id = target_id
    );
    let start = std::time::Instant::now();

    let relation = block_impl(actor_id, target_id, conn, &request_id).map_err(|e| {
        log_op_error!(
            "block",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64,
            request_id = request_id.as_str()
        );
        e
    })?;

    log_op_end!(
        "block",
        duration_ms = start.elapsed().as_millis() as u64,
        request_id = request_id.as_str(),
        relation_id = relation.id
    );

    Ok(relation)
}

fn block_impl(
    actor_id: i64,
    target_id: i64,
    conn: &mut Connection,
    request_id: &RequestId,
) -> Result<Relation> {
    let tx = conn
        .transaction()
        .map_err(|e| tag(from_rusqlite(e), "block", request_id))?;

    let relation = {
        let mut ledger = SqliteLedger::new(&tx);
        relation_ops::block(&mut ledger, actor_id, target_id)
            .map_err(|e| model_err(e, "block", request_id))?
    };

    tx.commit()
        .map_err(|e| tag(from_rusqlite(e), "block", request_id))?;

    Ok(relation)
}

/// Read one of the derived user lists for `user_id`
///
/// ## Errors
///
/// - `NotFound`: no such user
/// - `Persistence`: database error
pub fn view(view: SocialView, user_id: i64, conn: &Connection) -> Result<Vec<TwitterUser>> {
    let op = view.op();
    let request_id = RequestId::new();
    log_op_start!(op, request_id = request_id.as_str(), user_id = user_id);
    let start = std::time::Instant::now();

    let ledger = SqliteLedger::new(conn);
    let users = match view {
        SocialView::Followers => relation_ops::followers(&ledger, user_id),
        SocialView::Following => relation_ops::following(&ledger, user_id),
        SocialView::BlockList => relation_ops::block_list(&ledger, user_id),
        SocialView::RelationUsers => relation_ops::relation_users(&ledger, user_id),
    }
    .map_err(|e| {
        let e = model_err(e, op, &request_id);
        log_op_error!(
            op,
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64,
            request_id = request_id.as_str()
        );
        e
    })?;

    log_op_end!(
        op,
        duration_ms = start.elapsed().as_millis() as u64,
        request_id = request_id.as_str(),
        count = users.len()
    );

    Ok(users)
}

/// Users following `user_id`
pub fn followers(user_id: i64, conn: &Connection) -> Result<Vec<TwitterUser>> {
    view(SocialView::Followers, user_id, conn)
}

/// Users `user_id` follows
pub fn following(user_id: i64, conn: &Connection) -> Result<Vec<TwitterUser>> {
    view(SocialView::Following, user_id, conn)
}

/// Users `user_id` has blocked
pub fn block_list(user_id: i64, conn: &Connection) -> Result<Vec<TwitterUser>> {
    view(SocialView::BlockList, user_id, conn)
}
