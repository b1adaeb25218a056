mod create_form;
mod edit_modal;
mod filters_panel;
mod profile_card;

pub use create_form::CreateForm;
pub use edit_modal::EditModalView;
pub use filters_panel::FiltersPanel;
pub use profile_card::ProfileCardView;

use counsel_core::profile::ProfileInput;
use yew::{
  AttrValue,
  Callback,
  Html,
  TargetCast,
  html
};

use crate::app::Field;

/// Constraint attributes for a numeric
/// input. The browser's default `step`
/// of 1 blocks fractional ratings.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq,
)]
struct NumberRules {
  step: &'static str,
  min:  Option<&'static str>
}

/// `None` for plain text fields.
fn number_rules(
  field: Field
) -> Option<NumberRules> {
  match field {
    | Field::Fee => {
      Some(NumberRules {
        step: "1",
        min:  Some("0")
      })
    }
    // Out-of-range ratings reach the
    // core and get clamped.
    | Field::Rating => {
      Some(NumberRules {
        step: "any",
        min:  None
      })
    }
    | Field::Name
    | Field::Specialty
    | Field::City => None
  }
}

/// Text or number input bound to one
/// form field.
fn field_input(
  label: &str,
  value: &str,
  field: Field,
  on_field: &Callback<(Field, String)>
) -> Html {
  let rules = number_rules(field);
  let kind = if rules.is_some() {
    "number"
  } else {
    "text"
  };
  let step = rules.map(|rules| {
    AttrValue::Static(rules.step)
  });
  let min = rules
    .and_then(|rules| rules.min)
    .map(AttrValue::Static);

  let on_field = on_field.clone();
  let oninput = Callback::from(
    move |e: web_sys::InputEvent| {
      let input: web_sys::HtmlInputElement =
        e.target_unchecked_into();
      on_field.emit((field, input.value()));
    }
  );

  html! {
      <div class="field">
          <label>{ label.to_string() }</label>
          <input
              type={kind}
              {step}
              {min}
              value={value.to_string()}
              {oninput}
          />
      </div>
  }
}

/// Select bound to one form field.
fn field_select(
  label: &str,
  value: &str,
  choices: &[String],
  field: Field,
  on_field: &Callback<(Field, String)>
) -> Html {
  let on_field = on_field.clone();
  let onchange = Callback::from(
    move |e: web_sys::Event| {
      let select: web_sys::HtmlSelectElement =
        e.target_unchecked_into();
      on_field.emit((field, select.value()));
    }
  );

  html! {
      <div class="field">
          <label>{ label.to_string() }</label>
          <select value={value.to_string()} {onchange}>
              <option value="" selected={value.is_empty()}>{ format!("Select {label}") }</option>
              {
                  for choices.iter().map(|choice| html! {
                      <option value={choice.clone()} selected={choice == value}>{ choice.clone() }</option>
                  })
              }
          </select>
      </div>
  }
}

/// The five editable fields shared by
/// the create form and the edit modal.
fn profile_fields(
  form: &ProfileInput,
  cities: &[String],
  specialties: &[String],
  on_field: &Callback<(Field, String)>
) -> Html {
  html! {
      <>
          { field_input("Name", &form.name, Field::Name, on_field) }
          { field_select("Specialty", &form.specialty, specialties, Field::Specialty, on_field) }
          { field_select("City", &form.city, cities, Field::City, on_field) }
          { field_input("Fee (PKR)", &form.fee, Field::Fee, on_field) }
          { field_input("Rating", &form.rating, Field::Rating, on_field) }
      </>
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn rating_input_accepts_fractions_and_out_of_range()
  {
    let rating =
      number_rules(Field::Rating)
        .expect("rating is numeric");
    assert_eq!(rating.step, "any");
    assert_eq!(rating.min, None);
  }

  #[test]
  fn fee_input_is_whole_and_non_negative()
  {
    assert_eq!(
      number_rules(Field::Fee),
      Some(NumberRules {
        step: "1",
        min:  Some("0")
      })
    );
    assert_eq!(
      number_rules(Field::Name),
      None
    );
  }
}
