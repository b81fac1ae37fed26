use sniperdb::domain::{NewUser, User, UserPatch};

/// A fully populated user whose fields all derive from `user_id`.
pub fn make_user(user_id: &str) -> NewUser {
    NewUser {
        user_id: user_id.to_string(),
        default_wallet_address: format!("Def{user_id}Wa11et"),
        default_private_key: format!("def-private-key-{user_id}"),
        sniper_wallet_address: format!("Snp{user_id}Wa11et"),
        sniper_private_key: format!("sniper-private-key-{user_id}"),
        slippage: 10,
        trades: r#"{"buy_amount":0.1,"auto_sell":false}"#.to_string(),
        monitor_wallet: String::new(),
    }
}

/// Assert that a stored user carries exactly the attributes it was created with.
pub fn assert_matches_new(stored: &User, created: &NewUser) {
    assert_eq!(stored.user_id, created.user_id);
    assert_eq!(stored.default_wallet_address, created.default_wallet_address);
    assert_eq!(stored.default_private_key, created.default_private_key);
    assert_eq!(stored.sniper_wallet_address, created.sniper_wallet_address);
    assert_eq!(stored.sniper_private_key, created.sniper_private_key);
    assert_eq!(stored.slippage, created.slippage);
    assert_eq!(stored.trades, created.trades);
    assert_eq!(stored.monitor_wallet, created.monitor_wallet);
}

/// The user a successful `update_user(patch)` should leave behind.
pub fn apply_patch(patch: &UserPatch, user: &mut User) {
    if let Some(v) = &patch.default_wallet_address {
        user.default_wallet_address.clone_from(v);
    }
    if let Some(v) = &patch.default_private_key {
        user.default_private_key.clone_from(v);
    }
    if let Some(v) = &patch.sniper_wallet_address {
        user.sniper_wallet_address.clone_from(v);
    }
    if let Some(v) = &patch.sniper_private_key {
        user.sniper_private_key.clone_from(v);
    }
    if let Some(v) = patch.slippage {
        user.slippage = v;
    }
    if let Some(v) = &patch.trades {
        user.trades.clone_from(v);
    }
    if let Some(v) = &patch.monitor_wallet {
        user.monitor_wallet.clone_from(v);
    }
}
