use std::sync::LazyLock;

pub struct UiText {
    // --- Header ---
    pub brand: String,
    pub connect_wallet: String,

    // --- Pair selector ---
    pub search_hint: String,
    pub no_pairs_found: String,
    pub volume_prefix: String,

    // --- Chart ---
    pub stat_high_24h: String,
    pub stat_low_24h: String,
    pub stat_volume_24h: String,

    // --- Order form ---
    pub form_title: String,
    pub label_balance: String,
    pub label_price: String,
    pub label_amount: String,
    pub label_total: String,
    pub label_advanced: String,
    pub label_post_only: String,
    pub label_reduce_only: String,
    pub label_fee: String,
    pub label_available: String,
    pub order_placed_flash: String,

    // --- Order book ---
    pub book_title: String,
    pub book_col_price: String,
    pub book_col_amount: String,
    pub book_col_total: String,

    // --- Market trades ---
    pub trades_title: String,
    pub trades_live_badge: String,
    pub trades_col_time: String,

    // --- User orders ---
    pub orders_empty_open: String,
    pub orders_empty_open_hint: String,
    pub orders_empty_history: String,
    pub orders_empty_history_hint: String,
    pub orders_empty_trades: String,
    pub orders_empty_trades_hint: String,
    pub orders_cancel: String,
    pub orders_col_date: String,
    pub orders_col_pair: String,
    pub orders_col_type: String,
    pub orders_col_side: String,
    pub orders_col_amount: String,
    pub orders_col_price: String,
    pub orders_col_status: String,
    pub orders_col_fee: String,
    pub orders_col_action: String,
    pub orders_col_filled: String,
}

pub static UI_TEXT: LazyLock<UiText> = LazyLock::new(|| UiText {
    brand: "BTrade".into(),
    connect_wallet: "Connect Wallet".into(),

    search_hint: "Search pairs...".into(),
    no_pairs_found: "No trading pairs found".into(),
    volume_prefix: "Vol:".into(),

    stat_high_24h: "24h High".into(),
    stat_low_24h: "24h Low".into(),
    stat_volume_24h: "24h Volume".into(),

    form_title: "Place Order".into(),
    label_balance: "Balance:".into(),
    label_price: "Price".into(),
    label_amount: "Amount".into(),
    label_total: "Total".into(),
    label_advanced: "Advanced".into(),
    label_post_only: "Post Only".into(),
    label_reduce_only: "Reduce Only".into(),
    label_fee: "Fee (0.1%)".into(),
    label_available: "Available".into(),
    order_placed_flash: "Order Placed!".into(),

    book_title: "Order Book".into(),
    book_col_price: "Price".into(),
    book_col_amount: "Amount".into(),
    book_col_total: "Total".into(),

    trades_title: "Market Trades".into(),
    trades_live_badge: "Real-time".into(),
    trades_col_time: "Time".into(),

    orders_empty_open: "No Open Orders".into(),
    orders_empty_open_hint: "Your active orders will appear here".into(),
    orders_empty_history: "No Order History".into(),
    orders_empty_history_hint: "Your completed orders will appear here".into(),
    orders_empty_trades: "No Trade History".into(),
    orders_empty_trades_hint: "Your executed trades will appear here".into(),
    orders_cancel: "Cancel".into(),
    orders_col_date: "Date".into(),
    orders_col_pair: "Pair".into(),
    orders_col_type: "Type".into(),
    orders_col_side: "Side".into(),
    orders_col_amount: "Amount".into(),
    orders_col_price: "Price".into(),
    orders_col_status: "Status".into(),
    orders_col_fee: "Fee".into(),
    orders_col_action: "Action".into(),
    orders_col_filled: "Filled".into(),
});
