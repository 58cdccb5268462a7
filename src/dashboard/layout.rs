use crate::theme::theme_with_head;
use maud::Markup;
use maud::html;

pub fn layout(content: Markup) -> Markup {
    theme_with_head(
        Some("Dashboard"),
        html! {},
        html! {
            div class="min-h-full" {
                // Global Navigation Bar
                nav class="bg-white dark:bg-gray-800 border-b border-gray-200 dark:border-gray-700" {
                    div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8" {
                        div class="flex justify-between h-16" {
                            div class="flex items-center" {
                                a href="/" class="text-xl font-bold text-gray-900 dark:text-white" {
                                    "Userdesk"
                                }
                            }
                        }
                    }
                }

                // Main Content
                div class="flex-1 p-6" {
                    div class="max-w-5xl mx-auto" {
                        div class="flex flex-col gap-6" {
                            (content)
                        }
                    }
                }
            }
        },
    )
}
