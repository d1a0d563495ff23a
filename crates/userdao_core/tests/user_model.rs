use userdao_core::{NewUser, User, UserValidationError, MAX_NAME_CHARS};

#[test]
fn new_user_validation_accepts_regular_names() {
    let user = NewUser::new("Ann", "Lee", 30);
    assert!(user.validate().is_ok());
}

#[test]
fn new_user_validation_rejects_blank_names() {
    assert_eq!(
        NewUser::new("", "Lee", 30).validate(),
        Err(UserValidationError::EmptyFirstName)
    );
    assert_eq!(
        NewUser::new("Ann", " \t", 30).validate(),
        Err(UserValidationError::EmptyLastName)
    );
}

#[test]
fn name_length_is_counted_in_characters() {
    let at_limit = "ж".repeat(MAX_NAME_CHARS);
    assert!(NewUser::new(at_limit.as_str(), "Lee", 30).validate().is_ok());

    let over_limit = "ж".repeat(MAX_NAME_CHARS + 1);
    assert_eq!(
        NewUser::new(over_limit, "Lee", 30).validate(),
        Err(UserValidationError::FirstNameTooLong {
            len: MAX_NAME_CHARS + 1,
            max: MAX_NAME_CHARS,
        })
    );
}

#[test]
fn into_user_keeps_fields_and_attaches_id() {
    let user = NewUser::new("Ann", "Lee", 30).into_user(7);
    assert_eq!(
        user,
        User {
            id: 7,
            first_name: "Ann".to_string(),
            last_name: "Lee".to_string(),
            age: 30,
        }
    );
    assert_eq!(user.to_string(), "User { id: 7, name: Ann Lee, age: 30 }");
}

#[test]
fn user_serializes_with_snake_case_fields() {
    let user = NewUser::new("Ann", "Lee", 30).into_user(1);
    let json = serde_json::to_value(&user).unwrap();

    assert_eq!(json["id"], 1);
    assert_eq!(json["first_name"], "Ann");
    assert_eq!(json["last_name"], "Lee");
    assert_eq!(json["age"], 30);
}

#[test]
fn user_deserialization_rejects_out_of_range_age() {
    let parsed: Result<User, _> = serde_json::from_str(
        r#"{"id":1,"first_name":"Ann","last_name":"Lee","age":300}"#,
    );
    assert!(parsed.is_err());
}
