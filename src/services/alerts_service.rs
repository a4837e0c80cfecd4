//! The bot's alert commands. Prefix commands and the JSON endpoints both call these.

use crate::{
    AppState,
    error::CommandError,
    events,
    models::{Symbol, UserId, alert::is_valid_price},
    services::price_lookup::lookup_within,
};

#[derive(Debug, Clone)]
pub struct AlertCreated {
    pub symbol: Symbol,
    pub target: f64,
    pub current: f64,
    pub total: usize,
}

#[derive(Debug, Clone)]
pub struct ListedSymbol {
    pub symbol: Symbol,
    pub current: Option<f64>,
    pub targets: Vec<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct AlertListing {
    pub symbols: Vec<ListedSymbol>,
    pub total: usize,
}

#[derive(Debug, Clone)]
pub struct AlertsRemoved {
    pub symbol: Symbol,
    pub removed: usize,
    pub remaining: usize,
}

pub fn parse_symbol(raw: &str) -> Result<Symbol, CommandError> {
    Symbol::new(raw).ok_or(CommandError::MissingSymbol)
}

/// Accepts `1,250.5` style input; rejects anything that is not a positive finite number.
pub fn parse_target_price(raw: &str) -> Result<f64, CommandError> {
    let cleaned = raw.trim().replace(',', "");
    let price: f64 = cleaned
        .parse()
        .map_err(|_| CommandError::InvalidPrice(raw.to_string()))?;
    validate_price(price)
}

pub fn validate_price(price: f64) -> Result<f64, CommandError> {
    if !is_valid_price(price) {
        return Err(CommandError::InvalidPrice(price.to_string()));
    }
    Ok(price)
}

/// Validates the symbol against the price source once, then stores the target.
pub async fn set_alert(
    state: &AppState,
    user: UserId,
    symbol: &str,
    target: f64,
) -> Result<AlertCreated, CommandError> {
    let symbol = parse_symbol(symbol)?;
    let target = validate_price(target)?;

    let current = lookup_within(state.lookup.as_ref(), &symbol, state.settings.lookup_timeout())
        .await?
        .filter(|p| is_valid_price(*p))
        .ok_or_else(|| CommandError::SymbolNotFound(symbol.to_string()))?;

    state.store.add(user, &symbol, target);
    tracing::info!("alert set: user={user} symbol={symbol} target={target}");
    events::publish_alerts_updated(&state.events_tx);

    Ok(AlertCreated {
        total: state.store.total_for(user),
        symbol,
        target,
        current,
    })
}

/// The user's watches with a best-effort current price per symbol.
pub async fn show_alerts(state: &AppState, user: UserId) -> AlertListing {
    let entries = state.store.list_for(user);
    let mut listing = AlertListing::default();

    for entry in entries {
        let current = match lookup_within(
            state.lookup.as_ref(),
            &entry.symbol,
            state.settings.lookup_timeout(),
        )
        .await
        {
            Ok(p) => p.filter(|p| is_valid_price(*p)),
            Err(e) => {
                tracing::debug!("show_alerts: no price for {}: {e}", entry.symbol);
                None
            }
        };

        listing.total += entry.targets.len();
        listing.symbols.push(ListedSymbol {
            targets: entry.prices(),
            symbol: entry.symbol,
            current,
        });
    }

    listing
}

pub fn remove_alert(state: &AppState, user: UserId, symbol: &str) -> Result<AlertsRemoved, CommandError> {
    let symbol = parse_symbol(symbol)?;
    let removed = state.store.remove_all(user, &symbol);

    if removed > 0 {
        tracing::info!("alerts removed: user={user} symbol={symbol} count={removed}");
        events::publish_alerts_updated(&state.events_tx);
    }

    Ok(AlertsRemoved {
        remaining: state.store.total_for(user),
        symbol,
        removed,
    })
}
