//! Hand-authored fallback responses
//!
//! Used when documentation extraction fails or comes back empty: a static
//! instruction text per (platform, task) pair, with a generic pointer at
//! the vendor's documentation for everything else.

use cdpbot_common::model::{Platform, Task};

/// The fallback instruction text for a (platform, task) pair
pub fn fallback_response(platform: Platform, task: Task) -> String {
    match specific_fallback(platform, task) {
        Some(text) => text.to_string(),
        None => format!(
            "I apologize, but I'm having trouble accessing the documentation for {} right now. \
             Please try visiting the platform's documentation directly at {}.",
            platform.as_str(),
            platform.docs_home()
        ),
    }
}

fn specific_fallback(platform: Platform, task: Task) -> Option<&'static str> {
    let text = match (task, platform) {
        (Task::SourceSetup, Platform::Segment) => {
            "To set up a new source in Segment:\n1. Log in to your Segment workspace\n2. Navigate to Sources in the left sidebar\n3. Click 'Add Source'\n4. Select your source type and follow the configuration steps\n\nFor detailed instructions, please visit Segment's documentation."
        }
        (Task::SourceSetup, Platform::Mparticle) => {
            "To set up a new source in mParticle:\n1. Access your mParticle dashboard\n2. Go to Setup > Inputs\n3. Choose your input type and follow the setup wizard\n\nFor detailed instructions, please refer to mParticle's documentation."
        }
        (Task::SourceSetup, Platform::Lytics) => {
            "To set up a new source in Lytics:\n1. Log in to your Lytics account\n2. Navigate to the Sources section\n3. Click 'Add New Source'\n4. Follow the source-specific configuration steps\n\nFor more details, please check Lytics' documentation."
        }
        (Task::SourceSetup, Platform::Zeotap) => {
            "To set up a new source in Zeotap:\n1. Access your Zeotap dashboard\n2. Go to Data Sources\n3. Click 'Add New Source'\n4. Complete the source configuration\n\nFor detailed instructions, please visit Zeotap's documentation."
        }
        (Task::ProfileCreation, Platform::Segment) => {
            "To create user profiles in Segment:\n1. Implement the identify call\n2. Set up user traits\n3. Configure Identity Resolution settings\n\nPlease check Segment's documentation for implementation details."
        }
        (Task::ProfileCreation, Platform::Mparticle) => {
            "To create user profiles in mParticle:\n1. Use the Identity API\n2. Configure user attributes\n3. Set up identity mapping\n\nRefer to mParticle's documentation for complete instructions."
        }
        (Task::ProfileCreation, Platform::Lytics) => {
            "To create user profiles in Lytics:\n1. Set up identity collection\n2. Configure user attributes\n3. Define identity resolution rules\n\nSee Lytics' documentation for detailed steps."
        }
        (Task::ProfileCreation, Platform::Zeotap) => {
            "To create user profiles in Zeotap:\n1. Configure identity parameters\n2. Set up user attributes\n3. Define identity resolution settings\n\nCheck Zeotap's documentation for full details."
        }
        (Task::AudienceSegment, Platform::Segment) => {
            "To build audience segments in Segment:\n1. Go to Personas\n2. Create a new audience\n3. Define segment criteria\n4. Activate the segment\n\nConsult Segment's documentation for detailed instructions."
        }
        (Task::AudienceSegment, Platform::Mparticle) => {
            "To create segments in mParticle:\n1. Navigate to Audience Builder\n2. Define segment criteria\n3. Set activation parameters\n\nSee mParticle's documentation for complete steps."
        }
        (Task::AudienceSegment, Platform::Lytics) => {
            "To build segments in Lytics:\n1. Access Audience Builder\n2. Define segment rules\n3. Set up activation\n\nRefer to Lytics' documentation for detailed guidance."
        }
        (Task::AudienceSegment, Platform::Zeotap) => {
            "To create segments in Zeotap:\n1. Go to Audience Builder\n2. Define segment criteria\n3. Configure activation settings\n\nCheck Zeotap's documentation for full instructions."
        }
        (Task::DataIntegration, Platform::Segment) => {
            "To integrate data with Segment:\n1. Choose your integration type\n2. Configure the connection\n3. Set up data mapping\n4. Test the integration\n\nRefer to Segment's documentation for specific steps."
        }
        (Task::DataIntegration, Platform::Mparticle) => {
            "To integrate data with mParticle:\n1. Select integration type\n2. Configure connection settings\n3. Set up data forwarding\n\nSee mParticle's documentation for detailed instructions."
        }
        (Task::DataIntegration, Platform::Lytics) => {
            "To integrate data with Lytics:\n1. Choose integration type\n2. Configure connection\n3. Set up data mapping\n\nCheck Lytics' documentation for complete steps."
        }
        (Task::DataIntegration, Platform::Zeotap) => {
            "To integrate data with Zeotap:\n1. Select integration type\n2. Configure connection settings\n3. Set up data mapping\n\nRefer to Zeotap's documentation for detailed guidance."
        }
        _ => return None,
    };
    Some(text)
}
