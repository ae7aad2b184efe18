use faxboard::*;

#[derive(Form)]
struct SignupRequest {
    email: String,
    referral_code: Option<String>,
    seats: Option<u16>,
}

fn main() {
    let schema = SignupRequest::schema();
    assert_eq!(schema.table, "signup_requests");
    assert_eq!(schema.route, "signup-requests");
    assert_eq!(schema.label, "Signup Request");
    assert_eq!(schema.plural, "Signup Requests");
    assert_eq!(schema.field("email").map(|f| (f.label, f.required)), Some(("Email", true)));
    assert_eq!(schema.field("seats").map(|f| f.kind), Some(FieldKind::Number));
    let _ = SignupRequest { email: String::new(), referral_code: None, seats: Some(1) };
}
