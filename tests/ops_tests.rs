use chrono::NaiveDate;
use contacts::error::ContactsError;
use contacts::model::*;
use contacts::ops::*;
use contacts::queries::contact_queries;

fn setup() -> (rusqlite::Connection, Contact) {
    let conn = contacts::db::schema::test_connection();
    let jane = contact_ops::add_contact(&conn, "Jane", Some("Doe"), None, None, None).unwrap();
    (conn, jane)
}

// ==========================================================================
// CONTACT OPS TESTS
// ==========================================================================

#[test]
fn add_contact_trims_names() {
    let (conn, _) = setup();
    let contact = contact_ops::add_contact(&conn, "  Bob ", Some(" Roe  "), None, None, None).unwrap();
    assert_eq!(contact.first_name, "Bob");
    assert_eq!(contact.last_name, "Roe");
}

#[test]
fn add_contact_rejects_blank_first_name() {
    let (conn, _) = setup();
    let result = contact_ops::add_contact(&conn, "   ", Some("Doe"), None, None, None);
    assert!(matches!(result, Err(ContactsError::BlankField { .. })));
}

#[test]
fn add_contact_with_all_fields() {
    let (conn, _) = setup();
    let birthday = NaiveDate::from_ymd_opt(1990, 5, 15).unwrap();
    let contact = contact_ops::add_contact(
        &conn,
        "Bob",
        None,
        Some("1 Main St"),
        Some(birthday),
        Some("Loves hiking"),
    )
    .unwrap();

    assert_eq!(contact.last_name, "");
    assert_eq!(contact.address, Some("1 Main St".into()));
    assert_eq!(contact.birthday, Some(birthday));
    assert_eq!(contact.notes, Some("Loves hiking".into()));
}

#[test]
fn update_contact_sets_and_clears_fields() {
    let (conn, jane) = setup();
    let updated = contact_ops::update_contact(
        &conn,
        jane.id,
        Some("Janet"),
        None,
        Some(Some("2 Side St")),
        None,
        Some(Some("note")),
    )
    .unwrap();
    assert_eq!(updated.first_name, "Janet");
    assert_eq!(updated.last_name, "Doe");
    assert_eq!(updated.address.as_deref(), Some("2 Side St"));

    let cleared =
        contact_ops::update_contact(&conn, jane.id, None, None, Some(None), None, Some(None)).unwrap();
    assert_eq!(cleared.address, None);
    assert_eq!(cleared.notes, None);

    let stored = contact_queries::get_contact(&conn, jane.id).unwrap().unwrap();
    assert_eq!(stored, cleared);
}

#[test]
fn update_missing_contact_is_not_found() {
    let (conn, _) = setup();
    let result = contact_ops::update_contact(&conn, Id::generate(), Some("X"), None, None, None, None);
    assert!(matches!(result, Err(ContactsError::NotFound { .. })));
}

#[test]
fn delete_contact_removes_it() {
    let (conn, jane) = setup();
    contact_ops::delete_contact(&conn, jane.id).unwrap();
    assert!(contact_queries::get_contact(&conn, jane.id).unwrap().is_none());

    let again = contact_ops::delete_contact(&conn, jane.id);
    assert!(matches!(again, Err(ContactsError::NotFound { .. })));
}

// ==========================================================================
// DETAIL OPS TESTS
// ==========================================================================

#[test]
fn add_email_validates_format() {
    let (conn, jane) = setup();
    let email = detail_ops::add_email(&conn, jane.id, " jane@x.com ").unwrap();
    assert_eq!(email.email, "jane@x.com");

    let bad = detail_ops::add_email(&conn, jane.id, "not-an-email");
    assert!(matches!(bad, Err(ContactsError::InvalidFormat { .. })));
}

#[test]
fn add_detail_to_missing_contact_is_not_found() {
    let (conn, _) = setup();
    let missing = Id::generate();
    assert!(matches!(
        detail_ops::add_email(&conn, missing, "jane@x.com"),
        Err(ContactsError::NotFound { .. })
    ));
    assert!(matches!(
        detail_ops::add_phone(&conn, missing, "555", PhoneType::Mobile),
        Err(ContactsError::NotFound { .. })
    ));
}

#[test]
fn add_phone_keeps_type() {
    let (conn, jane) = setup();
    let phone = detail_ops::add_phone(&conn, jane.id, "555-0000", PhoneType::Telephone).unwrap();
    assert_eq!(phone.phone_type, PhoneType::Telephone);
    assert_eq!(phone.label(), "555-0000 (Telephone)");

    let blank = detail_ops::add_phone(&conn, jane.id, "  ", PhoneType::Mobile);
    assert!(matches!(blank, Err(ContactsError::BlankField { .. })));
}

#[test]
fn add_organization_normalizes_blank_optionals() {
    let (conn, jane) = setup();
    let org = detail_ops::add_organization(
        &conn,
        jane.id,
        " Acme ",
        Some("Eng Lead"),
        Some("  "),
        Some(""),
        None,
    )
    .unwrap();
    assert_eq!(org.organization, "Acme");
    assert_eq!(org.designation.as_deref(), Some("Eng Lead"));
    assert_eq!(org.team, None);
    assert_eq!(org.department, None);

    let blank = detail_ops::add_organization(&conn, jane.id, "", None, None, None, None);
    assert!(blank.is_err());
}

#[test]
fn add_url_and_social_link_require_http() {
    let (conn, jane) = setup();
    assert!(detail_ops::add_url(&conn, jane.id, "https://jane.dev").is_ok());
    assert!(detail_ops::add_social_link(&conn, jane.id, "http://social.example/jane").is_ok());

    assert!(matches!(
        detail_ops::add_url(&conn, jane.id, "ftp://jane.dev"),
        Err(ContactsError::InvalidFormat { .. })
    ));
    assert!(matches!(
        detail_ops::add_social_link(&conn, jane.id, "jane"),
        Err(ContactsError::InvalidFormat { .. })
    ));
}

#[test]
fn add_associated_name_rejects_blank() {
    let (conn, jane) = setup();
    let name = detail_ops::add_associated_name(&conn, jane.id, " Tom ").unwrap();
    assert_eq!(name.name, "Tom");
    assert!(detail_ops::add_associated_name(&conn, jane.id, "").is_err());
}

#[test]
fn remove_details_and_report_missing() {
    let (conn, jane) = setup();
    let email = detail_ops::add_email(&conn, jane.id, "jane@x.com").unwrap();
    let org = detail_ops::add_organization(&conn, jane.id, "Acme", None, None, None, None).unwrap();
    let name = detail_ops::add_associated_name(&conn, jane.id, "Tom").unwrap();

    detail_ops::remove_email(&conn, email.id).unwrap();
    detail_ops::remove_organization(&conn, org.id).unwrap();
    detail_ops::remove_associated_name(&conn, name.id).unwrap();

    let details = contact_queries::details_for(&conn, jane.id).unwrap().unwrap();
    assert!(details.emails.is_empty());
    assert!(details.organizations.is_empty());
    assert!(details.associated_names.is_empty());

    assert!(matches!(
        detail_ops::remove_email(&conn, email.id),
        Err(ContactsError::NotFound { .. })
    ));
    assert!(matches!(
        detail_ops::remove_phone(&conn, Id::generate()),
        Err(ContactsError::NotFound { .. })
    ));
}
