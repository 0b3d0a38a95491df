//! Static prompt templates for the three chain steps.
//!
//! Each builder reads only the fields its step depends on. Generated fields
//! that are not yet populated render as empty text.

use super::model::EmployeeState;

/// Step 1: welcome message, first-day schedule and key contacts.
pub fn welcome_package_prompt(state: &EmployeeState) -> String {
    format!(
        "Create a personalized welcome package for:
        Name: {name}
        Role: {role}
        Department: {department}
        Start Date: {start_date}
        
        Include: Welcome message, first-day schedule, and key contacts.",
        name = state.name,
        role = state.role,
        department = state.department,
        start_date = state.start_date,
    )
}

/// Step 2: learning path, training modules and skill assessments.
pub fn training_materials_prompt(state: &EmployeeState) -> String {
    format!(
        "Create training materials for:
        Role: {role}
        Skills: {skills}
        Department: {department}
        
        Include: Learning path, required training modules, and skill assessments.",
        role = state.role,
        skills = state.skills.join(", "),
        department = state.department,
    )
}

/// Step 3: combine both generated documents into a timeline-based plan.
pub fn final_package_prompt(state: &EmployeeState) -> String {
    format!(
        "Create a final onboarding package combining:
        Welcome Package: {welcome}
        Training Materials: {training}
        Access Levels: {access}
        
        Format as a structured onboarding plan with timeline.",
        welcome = state.welcome_package.as_deref().unwrap_or_default(),
        training = state.training_materials.as_deref().unwrap_or_default(),
        access = state.access_levels.join(", "),
    )
}
