pub(crate) mod dashboard_controller;
pub(crate) mod health_check_controller;
pub(crate) mod oauth_controller;
pub(crate) mod review_controller;
