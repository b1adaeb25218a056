use counsel_core::profile::ProfileInput;
use yew::{
  Callback,
  Html,
  Properties,
  function_component,
  html
};

use super::profile_fields;
use crate::app::Field;

#[derive(Properties, PartialEq)]
pub struct CreateFormProps {
  pub form:        ProfileInput,
  pub error:       Option<String>,
  pub cities:      Vec<String>,
  pub specialties: Vec<String>,
  pub on_field:
    Callback<(Field, String)>,
  pub on_submit:   Callback<()>
}

#[function_component(CreateForm)]
pub fn create_form(
  props: &CreateFormProps
) -> Html {
  let onsubmit = {
    let on_submit =
      props.on_submit.clone();
    Callback::from(
      move |e: web_sys::SubmitEvent| {
        e.prevent_default();
        on_submit.emit(());
      }
    )
  };

  html! {
      <form class="panel create-form" {onsubmit}>
          <div class="header">{ "Add a Lawyer" }</div>
          { profile_fields(&props.form, &props.cities, &props.specialties, &props.on_field) }
          {
              if let Some(error) = props.error.clone() {
                  html! { <div class="form-error">{ error }</div> }
              } else {
                  html! {}
              }
          }
          <div class="actions">
              <button type="submit" class="btn primary">{ "Add Lawyer" }</button>
          </div>
      </form>
  }
}
