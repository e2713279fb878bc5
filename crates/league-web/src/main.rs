use league_web::app_root::app_root;

fn main() {
    league_web::app::logging::init();
    dioxus::launch(app_root);
}
