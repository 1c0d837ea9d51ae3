//! Starter steps offered in the component palette

use crate::types::Step;

/// Steps most workflows start from
pub fn common_components() -> Vec<Step> {
    vec![
        Step::action("Checkout", "actions/checkout@v4"),
        Step::action("Setup Node.js", "actions/setup-node@v4"),
        Step::command("Install Dependencies", "npm ci"),
        Step::command("Run Tests", "npm test"),
        Step::command("Build", "npm run build"),
        Step::action("Upload Artifact", "actions/upload-artifact@v4"),
    ]
}
