use handlebars::Handlebars;
use std::sync::Arc;

pub type Hbs = Arc<Handlebars<'static>>;

pub fn build_handlebars() -> Hbs {
    let mut hb = Handlebars::new();
    // Chat markdown, not HTML.
    hb.register_escape_fn(handlebars::no_escape);

    hb.register_template_file("messages/alert_created", "templates/messages/alert_created.hbs")
        .expect("template messages/alert_created");
    hb.register_template_file("messages/alert_list", "templates/messages/alert_list.hbs")
        .expect("template messages/alert_list");
    hb.register_template_file("messages/no_alerts", "templates/messages/no_alerts.hbs")
        .expect("template messages/no_alerts");
    hb.register_template_file("messages/alerts_removed", "templates/messages/alerts_removed.hbs")
        .expect("template messages/alerts_removed");
    hb.register_template_file("messages/nothing_removed", "templates/messages/nothing_removed.hbs")
        .expect("template messages/nothing_removed");

    Arc::new(hb)
}
