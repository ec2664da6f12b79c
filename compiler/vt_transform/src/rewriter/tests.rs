use pretty_assertions::assert_eq;

use super::*;

fn plan(original: &str, flattened: &str, references_value_type: bool) -> MethodPlan {
    MethodPlan {
        class: "com/example/Shop".to_owned(),
        access: AccessFlags::PUBLIC,
        name: "setPrice".to_owned(),
        original_descriptor: original.to_owned(),
        flattened_descriptor: flattened.to_owned(),
        references_value_type,
    }
}

#[test]
fn emits_flattened_descriptor() {
    let method = MethodDecl::new(AccessFlags::PUBLIC, "setPrice", "(Lcom/example/Price;)V");
    let out = SignatureRewriter
        .rewrite(&plan("(Lcom/example/Price;)V", "(J)V", true), method)
        .map(|m| m.descriptor);
    assert_eq!(out, Ok("(J)V".to_owned()));
}

#[test]
fn keeps_methods_without_value_types() {
    let method = MethodDecl::new(AccessFlags::PUBLIC, "run", "()V");
    let out = SignatureRewriter.rewrite(&plan("()V", "()V", false), method.clone());
    assert_eq!(out, Ok(method));
}

#[test]
fn mismatched_plan_is_an_invariant_breach() {
    let method = MethodDecl::new(AccessFlags::PUBLIC, "run", "()V");
    let out = SignatureRewriter.rewrite(&plan("(J)V", "(J)V", false), method);
    assert!(matches!(out, Err(TransformError::Invariant(_))));
}

#[test]
fn rewriter_by_reference() {
    let mut inner = SignatureRewriter;
    let mut by_ref = &mut inner;
    let method = MethodDecl::new(AccessFlags::PUBLIC, "run", "()V");
    let out = <&mut SignatureRewriter as MethodRewriter>::rewrite(
        &mut by_ref,
        &plan("()V", "()V", false),
        method.clone(),
    );
    assert_eq!(out, Ok(method));
}
