use std::io::Cursor;

use counsel_cli::render::Renderer;
use counsel_cli::session::Session;
use counsel_core::profile::Profile;
use counsel_core::{Directory, ModalPhase};

fn seed() -> Vec<Profile> {
    vec![Profile {
        id: 1,
        name: "Ali Raza".to_string(),
        specialty: "Family".to_string(),
        city: "Lahore".to_string(),
        fee: 12000,
        rating: 4.5,
        bar_id: "PK-001".to_string(),
    }]
}

fn run_script(script: &str, confirm_delete: bool) -> (Session, String) {
    let directory = Directory::from_seed(seed()).expect("seed");
    let mut session = Session::new(directory, Renderer::plain(), confirm_delete);
    let mut out = Vec::new();
    session
        .run(Cursor::new(script.to_string()), &mut out)
        .expect("session runs");
    (session, String::from_utf8(out).expect("utf8 output"))
}

#[test]
fn add_delete_edit_script() {
    let script = "\
add Zara Sheikh | Corporate | Islamabad | 25000 | 4.0
delete 1
y
edit 2
save | | | | 6
quit
";
    let (session, out) = run_script(script, true);
    let directory = session.directory();

    assert_eq!(directory.store().len(), 1);
    let zara = directory.store().get(2).expect("profile 2");
    assert_eq!(zara.bar_id, "PK-NEW-2");
    assert_eq!(zara.rating, 5.0);
    assert_eq!(directory.modal().cursor(), None);
    assert_eq!(directory.modal().phase(), ModalPhase::Closed);

    assert!(out.contains("Profile Zara Sheikh added successfully!"));
    assert!(out.contains("Are you sure you want to delete profile ID 1?"));
    assert!(out.contains("Profile with ID 1 deleted."));
    assert!(out.contains("Profile updated successfully!"));
}

#[test]
fn saving_a_deleted_profile_is_silent() {
    let (session, out) = run_script("edit 1\ndelete 1\nsave | | | | 3\n", false);
    let directory = session.directory();

    assert!(directory.store().is_empty());
    assert!(out.contains("Profile with ID 1 deleted."));
    assert!(!out.contains("Profile updated successfully!"));
    assert_eq!(directory.modal().cursor(), None);
    assert_eq!(directory.modal().phase(), ModalPhase::Closed);
}

#[test]
fn declined_delete_keeps_profile() {
    let (session, out) = run_script("delete 1\nn\n", true);
    assert_eq!(session.directory().store().len(), 1);
    assert!(!out.contains("deleted."));
}

#[test]
fn invalid_numbers_are_reported_and_ignored() {
    let (session, out) = run_script("add Zara | Tax | Karachi | lots | 4\n", false);
    assert_eq!(session.directory().store().len(), 1);
    assert!(out.contains("Fee and Rating must be valid numbers."));
}

#[test]
fn filters_drive_the_printed_view() {
    let (session, out) = run_script("search nobody\nclear\nfee high\n", false);
    assert!(out.contains("No profiles match the current filters."));
    assert!(session.directory().view().no_results);

    let (session, _) = run_script("fee low\ncity Lahore\nrating 4\n", false);
    assert_eq!(session.directory().view().cards.len(), 1);
}

#[test]
fn unknown_commands_do_not_stop_the_session() {
    let (session, out) = run_script("bogus\nadd A | Tax | Quetta | 100 | 3\n", false);
    assert!(out.contains("unknown command: bogus"));
    assert_eq!(session.directory().store().len(), 2);
}
