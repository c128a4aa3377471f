//! Pure validation for the data entry forms.
//!
//! Every check returns the first failing message, so the screens surface one
//! error at a time next to the form.

use store::Money;
use uuid::Uuid;

/// A validated expense, ready to submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseDraft {
    pub name: String,
    pub amount_cents: i64,
    pub user_id: Uuid,
    pub payment_method_id: Uuid,
    pub tag_ids: Vec<Uuid>,
}

pub fn validate_name(name: &str) -> Result<String, String> {
    let name = name.trim();
    if name.is_empty() {
        return Err("Nome é obrigatório".to_string());
    }

    Ok(name.to_string())
}

/// Parses the typed amount into centavos. Accepts `,` or `.` as decimal
/// separator, two decimals at most, no sign.
pub fn validate_amount(raw: &str) -> Result<i64, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err("Valor é obrigatório".to_string());
    }

    let amount: Money = raw
        .parse()
        .map_err(|_| "Digite um valor válido".to_string())?;
    if !amount.is_positive() {
        return Err("Digite um valor válido".to_string());
    }

    Ok(amount.cents())
}

/// Field order mirrors the form: name, amount, payer, payment method.
pub fn validate_expense(
    name: &str,
    amount: &str,
    user_id: Option<Uuid>,
    payment_method_id: Option<Uuid>,
    tag_ids: &[Uuid],
) -> Result<ExpenseDraft, String> {
    let name = validate_name(name)?;
    let amount_cents = validate_amount(amount)?;
    let user_id =
        user_id.ok_or_else(|| "Selecione um usuário responsável pela despesa".to_string())?;
    let payment_method_id =
        payment_method_id.ok_or_else(|| "Selecione uma forma de pagamento".to_string())?;

    Ok(ExpenseDraft {
        name,
        amount_cents,
        user_id,
        payment_method_id,
        tag_ids: tag_ids.to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_required() {
        assert_eq!(validate_name("   "), Err("Nome é obrigatório".to_string()));
        assert_eq!(validate_name(" Jantar "), Ok("Jantar".to_string()));
    }

    #[test]
    fn amount_is_required() {
        assert_eq!(validate_amount(""), Err("Valor é obrigatório".to_string()));
        assert_eq!(
            validate_amount("  "),
            Err("Valor é obrigatório".to_string())
        );
    }

    #[test]
    fn amount_must_be_a_positive_decimal() {
        assert_eq!(
            validate_amount("abc"),
            Err("Digite um valor válido".to_string())
        );
        assert_eq!(
            validate_amount("1.234"),
            Err("Digite um valor válido".to_string())
        );
        assert_eq!(
            validate_amount("-5"),
            Err("Digite um valor válido".to_string())
        );
        assert_eq!(
            validate_amount("0"),
            Err("Digite um valor válido".to_string())
        );
    }

    #[test]
    fn amount_accepts_comma_and_dot() {
        assert_eq!(validate_amount("49,90"), Ok(4990));
        assert_eq!(validate_amount("50"), Ok(5000));
        assert_eq!(validate_amount("50.5"), Ok(5050));
    }

    #[test]
    fn name_failure_wins_over_amount() {
        let err = validate_expense("", "", None, None, &[]);
        assert_eq!(err, Err("Nome é obrigatório".to_string()));
    }

    #[test]
    fn payer_is_required_before_payment_method() {
        let err = validate_expense("Jantar", "50", None, None, &[]);
        assert_eq!(
            err,
            Err("Selecione um usuário responsável pela despesa".to_string())
        );

        let err = validate_expense("Jantar", "50", Some(Uuid::from_u128(1)), None, &[]);
        assert_eq!(err, Err("Selecione uma forma de pagamento".to_string()));
    }

    #[test]
    fn complete_form_builds_a_draft() {
        let tags = [Uuid::from_u128(7), Uuid::from_u128(8)];
        let draft = validate_expense(
            "Jantar",
            "50,00",
            Some(Uuid::from_u128(1)),
            Some(Uuid::from_u128(2)),
            &tags,
        );

        assert_eq!(
            draft,
            Ok(ExpenseDraft {
                name: "Jantar".to_string(),
                amount_cents: 5000,
                user_id: Uuid::from_u128(1),
                payment_method_id: Uuid::from_u128(2),
                tag_ids: tags.to_vec(),
            })
        );
    }
}
